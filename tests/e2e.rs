mod common;

use common::synthetic_image::{
    brighten, checker_texture_rgb, flatten_contrast, horizontal_gradient_rgb, noisy_ramp_rgb,
};
use regrain::image::{RgbImageF32, RgbImageU8};
use regrain::{IterationSchedule, RegrainParams, Regrainer};

fn params(schedule: Vec<usize>, min_dimension: usize) -> RegrainParams {
    RegrainParams {
        schedule: IterationSchedule::new(schedule).unwrap(),
        min_dimension,
        ..Default::default()
    }
}

fn normalized(w: usize, h: usize, bytes: &[u8]) -> RgbImageF32 {
    RgbImageF32::from_u8(RgbImageU8::new(w, h, bytes).unwrap())
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// Mean absolute difference between horizontally adjacent pixels.
fn mean_adjacent_difference(img: &RgbImageF32) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for y in 0..img.h {
        for x in 0..img.w - 1 {
            let a = img.get(x, y);
            let b = img.get(x + 1, y);
            for ch in 0..3 {
                sum += (a[ch] - b[ch]).abs();
                n += 1;
            }
        }
    }
    sum / n as f32
}

#[test]
fn brightened_gradient_takes_matched_colours_and_keeps_slope() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (64usize, 64usize);
    let original_bytes = horizontal_gradient_rgb(w, h);
    let matched_bytes = brighten(&original_bytes, 20);

    let out = Regrainer::new(params(vec![4, 16], 20))
        .regrain(
            RgbImageU8::new(w, h, &original_bytes).unwrap(),
            RgbImageU8::new(w, h, &matched_bytes).unwrap(),
        )
        .expect("regrain should succeed");
    assert_eq!(out.report.depth(), 2);

    let original = normalized(w, h, &original_bytes);
    let matched = normalized(w, h, &matched_bytes);
    let result = out.image;
    assert_eq!((result.w, result.h), (w, h));

    let out_rows = result.row_means();
    let orig_rows = original.row_means();
    let matched_rows = matched.row_means();
    for y in 0..h {
        let to_matched = (out_rows[y] - matched_rows[y]).abs();
        let to_original = (out_rows[y] - orig_rows[y]).abs();
        assert!(
            to_matched < to_original,
            "row {y}: mean {:.4} should be closer to matched {:.4} than original {:.4}",
            out_rows[y],
            matched_rows[y],
            orig_rows[y]
        );
    }

    for y in 0..h {
        for x in 0..w - 1 {
            for ch in 0..3 {
                let d_out = result.get(x + 1, y)[ch] - result.get(x, y)[ch];
                let d_orig = original.get(x + 1, y)[ch] - original.get(x, y)[ch];
                assert!(
                    (d_out - d_orig).abs() <= 0.05,
                    "gradient drift at ({x}, {y}) ch {ch}: {d_out:.4} vs {d_orig:.4}"
                );
            }
        }
    }
}

#[test]
fn fine_texture_survives_flat_colour_transfer() {
    let (w, h) = (64usize, 64usize);
    let original_bytes = checker_texture_rgb(w, h, 2, 110, 10);
    let matched_bytes = vec![140u8; w * h * 3];

    let out = Regrainer::new(params(vec![4, 16], 20))
        .regrain(
            RgbImageU8::new(w, h, &original_bytes).unwrap(),
            RgbImageU8::new(w, h, &matched_bytes).unwrap(),
        )
        .unwrap();

    let original = normalized(w, h, &original_bytes);
    let texture_in = mean_adjacent_difference(&original);
    let texture_out = mean_adjacent_difference(&out.image);
    assert!(
        texture_out > 0.5 * texture_in,
        "texture flattened: {texture_out:.4} vs original {texture_in:.4}"
    );

    let out_mean = mean(&out.image.row_means());
    let orig_mean = mean(&original.row_means());
    let matched_mean = 140.0 / 255.0;
    assert!((out_mean - matched_mean).abs() < (out_mean - orig_mean).abs());
}

#[test]
fn output_stays_in_unit_range_for_representative_inputs() {
    let (w, h) = (90usize, 70usize);
    let original_bytes = noisy_ramp_rgb(w, h, 7);
    let matched_bytes = flatten_contrast(&original_bytes, 0.7, 12.0);

    let out = Regrainer::default()
        .regrain(
            RgbImageU8::new(w, h, &original_bytes).unwrap(),
            RgbImageU8::new(w, h, &matched_bytes).unwrap(),
        )
        .unwrap();

    let (lo, hi) = out.image.value_range().unwrap();
    assert!(lo >= -0.05 && hi <= 1.05, "range drifted to [{lo}, {hi}]");
    assert!(out.image.data.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn output_matches_input_dimensions() {
    for (w, h) in [(77usize, 53usize), (21, 130), (5, 3), (1, 1)] {
        let original = noisy_ramp_rgb(w, h, 3);
        let matched = flatten_contrast(&original, 0.9, -5.0);
        let out = Regrainer::default()
            .regrain(
                RgbImageU8::new(w, h, &original).unwrap(),
                RgbImageU8::new(w, h, &matched).unwrap(),
            )
            .unwrap();
        assert_eq!((out.image.w, out.image.h), (w, h));
        assert_eq!((out.report.width, out.report.height), (w, h));
    }
}

#[test]
fn repeated_runs_are_identical() {
    let (w, h) = (80usize, 60usize);
    let original = noisy_ramp_rgb(w, h, 11);
    let matched = flatten_contrast(&original, 0.8, 8.0);
    let regrainer = Regrainer::default();
    let run = || {
        regrainer
            .regrain(
                RgbImageU8::new(w, h, &original).unwrap(),
                RgbImageU8::new(w, h, &matched).unwrap(),
            )
            .unwrap()
            .image
    };
    assert_eq!(run(), run());
}
