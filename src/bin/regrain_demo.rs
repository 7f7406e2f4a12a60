use regrain::config::load_config;
use regrain::image::io::{load_rgb_image, save_rgb_f32, write_json_file};
use regrain::{RegrainReport, Regrainer};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let original = load_rgb_image(&config.original).map_err(|e| e.to_string())?;
    let matched = load_rgb_image(&config.color_matched).map_err(|e| e.to_string())?;

    let regrainer = Regrainer::new(config.params.clone());
    let out = regrainer
        .regrain(original.as_view(), matched.as_view())
        .map_err(|e| e.to_string())?;

    save_rgb_f32(&out.image, &config.output.image).map_err(|e| e.to_string())?;
    println!("Saved regrained image to {}", config.output.image.display());

    print_levels(&out.report);

    if let Some(path) = &config.output.report_json {
        let (min_value, max_value) = out.image.value_range().unwrap_or((0.0, 0.0));
        let summary = RegrainSummary {
            min_value,
            max_value,
            total_iterations: out.report.total_iterations(),
            report: &out.report,
        };
        write_json_file(path, &summary).map_err(|e| e.to_string())?;
        println!("Saved report to {}", path.display());
    }

    Ok(())
}

fn print_levels(report: &RegrainReport) {
    for level in &report.levels {
        println!(
            "  level {}: {}x{} iterations={} mean_psi={:.3} {:.2} ms",
            level.level_index,
            level.width,
            level.height,
            level.iterations,
            level.mean_edge_weight,
            level.elapsed_ms
        );
    }
    println!("  total: {:.2} ms", report.timing.total_ms);
}

fn usage() -> String {
    "Usage: regrain_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegrainSummary<'a> {
    min_value: f32,
    max_value: f32,
    total_iterations: usize,
    report: &'a RegrainReport,
}
