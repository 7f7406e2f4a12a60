//! Synthetic 8-bit RGB inputs for the integration tests.
#![allow(dead_code)]

/// Black-to-white ramp along x, identical in every row and channel.
pub fn horizontal_gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 1 && height > 0, "gradient needs at least two columns");
    let mut img = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let v = (255.0 * x as f32 / (width - 1) as f32).round() as u8;
            img.extend_from_slice(&[v, v, v]);
        }
    }
    img
}

/// Flat grey with a checker of `±amplitude` and `cell`-pixel squares on top.
pub fn checker_texture_rgb(
    width: usize,
    height: usize,
    cell: usize,
    base: u8,
    amplitude: u8,
) -> Vec<u8> {
    assert!(cell > 0, "cell size must be positive");
    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) % 2 == 0 {
                base.saturating_add(amplitude)
            } else {
                base.saturating_sub(amplitude)
            };
            img.extend_from_slice(&[v, v, v]);
        }
    }
    img
}

/// Per-channel brightening, saturating at 255.
pub fn brighten(img: &[u8], delta: u8) -> Vec<u8> {
    img.iter().map(|&v| v.saturating_add(delta)).collect()
}

/// Every channel set to `value`.
pub fn flat_rgb(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height * 3]
}

/// Deterministic pseudo-random texture mixed into a smooth diagonal ramp.
pub fn noisy_ramp_rgb(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let ramp = 40.0 + 170.0 * (x + y) as f32 / (width + height) as f32;
            for ch in 0..3 {
                // xorshift32
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let noise = (state % 31) as f32 - 15.0;
                let v = ramp + noise + 10.0 * ch as f32;
                img.push(v.clamp(0.0, 255.0) as u8);
            }
        }
    }
    img
}

/// Global contrast reduction towards mid grey plus an offset, as a crude
/// stand-in for a colour transfer that flattens texture.
pub fn flatten_contrast(img: &[u8], gain: f32, offset: f32) -> Vec<u8> {
    img.iter()
        .map(|&v| (128.0 + gain * (v as f32 - 128.0) + offset).clamp(0.0, 255.0) as u8)
        .collect()
}
