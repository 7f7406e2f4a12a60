//! Per-level weight fields of the relaxation.
//!
//! - `gradient_magnitude`: central differences of the original summed over
//!   the three channels, `sqrt(gx^2 + gy^2)`.
//! - `edge_weight`/`edge_weights`: the data-term weight psi, a clipped linear
//!   map of the gradient magnitude. Flat regions get a small psi (the
//!   estimate follows its neighbours), edges saturate at 1.
//! - `RegularizationField`: strategy producing the smoothness weight phi.
use crate::error::{RegrainError, Result};
use crate::image::{ImageF32, RgbImageF32};
use crate::shift::Shifts;

/// Channel-summed gradient magnitude of an image, given its neighbour shifts.
pub fn gradient_magnitude(shifts: &Shifts) -> ImageF32 {
    let gx = difference_sum(&shifts.right, &shifts.left);
    let gy = difference_sum(&shifts.down, &shifts.up);
    let mut mag = ImageF32::new(gx.w, gx.h);
    for ((m, &x), &y) in mag.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *m = (x * x + y * y).sqrt();
    }
    mag
}

/// `sum_c(a[c] - b[c])` per pixel.
fn difference_sum(a: &RgbImageF32, b: &RgbImageF32) -> ImageF32 {
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(p, q)| (p[0] - q[0]) + (p[1] - q[1]) + (p[2] - q[2]))
        .collect();
    ImageF32 {
        w: a.w,
        h: a.h,
        data,
    }
}

/// psi for one gradient magnitude: `min(1, scale * g / saturation)`.
///
/// With the default `scale = 255` and `saturation = 5` a gradient of five
/// 8-bit levels or more counts as a full edge.
#[inline]
pub fn edge_weight(g: f32, scale: f32, saturation: f32) -> f32 {
    (scale * g / saturation).min(1.0)
}

pub fn edge_weights(grad: &ImageF32, scale: f32, saturation: f32) -> ImageF32 {
    grad.map(|g| edge_weight(g, scale, saturation))
}

/// Source of the smoothness weight phi for one pyramid level.
///
/// The returned field must match the original's size and hold finite,
/// strictly positive values so that `psi + 4 * phi` never vanishes;
/// `check_field` enforces this before solving.
///
/// Only `ConstantField` is provided. The colour grading paper also proposes a
/// spatially varying phi that decays with the original's gradient, relaxing
/// the gradient constraint across strong edges; that variant is not
/// implemented.
pub trait RegularizationField: Send + Sync {
    fn field(&self, original: &RgbImageF32, level: usize) -> ImageF32;
}

/// Spatially constant phi, `1.0` by default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField(pub f32);

impl Default for ConstantField {
    fn default() -> Self {
        Self(1.0)
    }
}

impl RegularizationField for ConstantField {
    fn field(&self, original: &RgbImageF32, _level: usize) -> ImageF32 {
        ImageF32::filled(original.w, original.h, self.0)
    }
}

/// Reject a weight field of the wrong size or with non-positive/non-finite values.
pub fn check_field(name: &'static str, field: &ImageF32, w: usize, h: usize) -> Result<()> {
    if (field.w, field.h) != (w, h) {
        return Err(RegrainError::ShapeMismatch {
            what: name,
            expected: (w, h),
            actual: (field.w, field.h),
        });
    }
    if let Some(v) = field.data.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(RegrainError::InvalidField(format!(
            "{name} contains {v}, weights must be finite and positive"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::shift_image;

    #[test]
    fn edge_weight_is_linear_then_saturates() {
        assert_eq!(edge_weight(0.0, 255.0, 5.0), 0.0);
        assert!((edge_weight(2.0 / 255.0, 255.0, 5.0) - 0.4).abs() < 1e-6);
        assert!((edge_weight(5.0 / 255.0, 255.0, 5.0) - 1.0).abs() < 1e-6);
        assert_eq!(edge_weight(0.5, 255.0, 5.0), 1.0);
    }

    #[test]
    fn flat_image_has_zero_gradient() {
        let img = RgbImageF32::from_fn(5, 4, |_, _| [0.3, 0.6, 0.9]);
        let grad = gradient_magnitude(&shift_image(&img));
        assert!(grad.data.iter().all(|&g| g == 0.0));
        let psi = edge_weights(&grad, 255.0, 5.0);
        assert!(psi.data.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn gradient_sums_channels_and_spans_two_pixels() {
        // horizontal ramp, step 0.01 per pixel in each channel
        let img = RgbImageF32::from_fn(5, 3, |x, _| {
            let v = 0.01 * x as f32;
            [v, v, v]
        });
        let grad = gradient_magnitude(&shift_image(&img));
        // interior: (x+1) - (x-1) = 0.02 per channel, three channels
        assert!((grad.get(2, 1) - 0.06).abs() < 1e-6);
        // border: replicated neighbour halves the span
        assert!((grad.get(0, 1) - 0.03).abs() < 1e-6);
    }

    #[test]
    fn constant_field_matches_original_size() {
        let img = RgbImageF32::new(3, 2);
        let phi = ConstantField::default().field(&img, 0);
        assert_eq!((phi.w, phi.h), (3, 2));
        assert!(phi.data.iter().all(|&v| v == 1.0));
        assert!(check_field("phi", &phi, 3, 2).is_ok());
    }

    #[test]
    fn check_field_rejects_bad_weights() {
        for bad in [-1.0, 0.0, f32::NAN] {
            let field = ImageF32::filled(2, 2, bad);
            assert!(matches!(
                check_field("phi", &field, 2, 2),
                Err(RegrainError::InvalidField(_))
            ));
        }
        let mut one_bad_pixel = ImageF32::filled(2, 2, 1.0);
        one_bad_pixel.set(1, 1, f32::INFINITY);
        assert_eq!(one_bad_pixel.get(1, 1), f32::INFINITY);
        assert!(check_field("phi", &one_bad_pixel, 2, 2).is_err());

        let wrong_size = ImageF32::filled(2, 3, 1.0);
        assert!(matches!(
            check_field("phi", &wrong_size, 2, 2),
            Err(RegrainError::ShapeMismatch { .. })
        ));
    }
}
