use regrain::image::io::{load_rgb_image, save_rgb_f32};
use regrain::{RegrainParams, Regrainer};
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
    let args: Vec<String> = env::args().skip(1).collect();
    let [original_path, matched_path, output_path] = args.as_slice() else {
        return Err(usage());
    };

    let original = load_rgb_image(Path::new(original_path)).map_err(|e| e.to_string())?;
    let matched = load_rgb_image(Path::new(matched_path)).map_err(|e| e.to_string())?;

    let regrainer = Regrainer::new(RegrainParams::default());
    let out = regrainer
        .regrain(original.as_view(), matched.as_view())
        .map_err(|e| e.to_string())?;

    save_rgb_f32(&out.image, Path::new(output_path)).map_err(|e| e.to_string())?;
    println!(
        "Regrained {}x{} over {} levels in {:.1} ms -> {}",
        out.report.width,
        out.report.height,
        out.report.depth(),
        out.report.timing.total_ms,
        output_path
    );
    Ok(())
}

fn usage() -> String {
    [
        "Usage: regrain <original> <color_matched> <output>",
        "  original       (IN)  image before colour transfer",
        "  color_matched  (IN)  same image after colour transfer",
        "  output         (OUT) regrained image",
    ]
    .join("\n")
}
