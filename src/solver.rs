//! Damped relaxation of the regraining energy at a single resolution.
//!
//! The estimate `J` minimises, per pixel,
//!
//! ```text
//! psi * |J - C|^2 + phi * sum_n |(J - J_n) - (I - I_n)|^2
//! ```
//!
//! where `I` is the original, `C` the colour-matched image and `n` runs over
//! the four edge-replicated neighbours. Each sweep solves that local problem
//! with the neighbours frozen at the previous estimate and blends the result
//! with the previous estimate:
//!
//! ```text
//! J' = (psi * C + sum_n (J_n - I_n + I)) / (psi + 4 * phi)
//! J  = (1 - rho) * J' + rho * J
//! ```
//!
//! The number of sweeps is fixed by the caller; there is no convergence test.
//! A sweep reads only the previous buffers, so rows are updated in parallel.
use crate::error::{RegrainError, Result};
use crate::image::{ImageF32, ImageView, Rgb, RgbImageF32};
use crate::shift::{shift_image, Shifts};
use crate::weights::{
    check_field, edge_weights, gradient_magnitude, ConstantField, RegularizationField,
};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Numeric constants of the relaxation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Share of the previous estimate kept by each sweep.
    pub rho: f32,
    /// Factor applied to the gradient magnitude before thresholding (maps
    /// `[0, 1]` data back to 8-bit levels).
    pub edge_scale: f32,
    /// Scaled gradient at which psi reaches 1.
    pub edge_saturation: f32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            rho: 0.2,
            edge_scale: 255.0,
            edge_saturation: 5.0,
        }
    }
}

impl SolverOptions {
    /// Reject constants outside the range where a sweep stays a convex blend
    /// and psi stays a finite ratio.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.rho) {
            return Err(RegrainError::Config(format!(
                "rho must lie in [0, 1), got {}",
                self.rho
            )));
        }
        for (name, value) in [
            ("edge_scale", self.edge_scale),
            ("edge_saturation", self.edge_saturation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RegrainError::Config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Result of one level's relaxation.
#[derive(Clone, Debug)]
pub struct Solution {
    pub image: RgbImageF32,
    /// Mean of psi over the level, reported in diagnostics.
    pub mean_edge_weight: f32,
}

/// Relaxation solver bound to its options and phi strategy.
#[derive(Clone, Copy)]
pub struct RelaxationSolver<'a> {
    options: SolverOptions,
    phi: &'a dyn RegularizationField,
}

impl std::fmt::Debug for RelaxationSolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaxationSolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> RelaxationSolver<'a> {
    pub fn new(options: SolverOptions, phi: &'a dyn RegularizationField) -> Self {
        Self { options, phi }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Run `iterations` sweeps starting from `seed` and return the new
    /// estimate. With zero iterations the seed is returned untouched.
    pub fn solve(
        &self,
        original: &RgbImageF32,
        color_matched: &RgbImageF32,
        seed: RgbImageF32,
        iterations: usize,
        level: usize,
    ) -> Result<Solution> {
        check_shapes(original, color_matched, &seed)?;
        self.options.validate()?;

        let (w, h) = original.dims();
        let shifts = shift_image(original);
        let grad = gradient_magnitude(&shifts);
        let psi = edge_weights(&grad, self.options.edge_scale, self.options.edge_saturation);
        let phi = self.phi.field(original, level);
        check_field("phi", &phi, w, h)?;
        let mean_edge_weight = psi.mean();

        debug!(
            "RelaxationSolver level={} size={}x{} iterations={} mean_psi={:.4}",
            level, w, h, iterations, mean_edge_weight
        );

        if iterations == 0 {
            return Ok(Solution {
                image: seed,
                mean_edge_weight,
            });
        }

        let terms = FixedTerms::new(original, color_matched, &shifts, &psi, &phi);
        let rho = self.options.rho;
        let mut estimate = seed;
        for _ in 0..iterations {
            estimate = sweep(&estimate, &terms, rho);
        }

        Ok(Solution {
            image: estimate,
            mean_edge_weight,
        })
    }
}

/// Solve one level with the default constant phi.
pub fn solve(
    original: &RgbImageF32,
    color_matched: &RgbImageF32,
    seed: RgbImageF32,
    iterations: usize,
    options: &SolverOptions,
) -> Result<RgbImageF32> {
    let phi = ConstantField::default();
    RelaxationSolver::new(*options, &phi)
        .solve(original, color_matched, seed, iterations, 0)
        .map(|s| s.image)
}

pub(crate) fn check_shapes(
    original: &RgbImageF32,
    color_matched: &RgbImageF32,
    estimate: &RgbImageF32,
) -> Result<()> {
    let expected = original.dims();
    if original.is_empty() {
        return Err(RegrainError::EmptyImage {
            width: expected.0,
            height: expected.1,
        });
    }
    for (what, img) in [("colour-matched image", color_matched), ("estimate", estimate)] {
        if img.dims() != expected {
            return Err(RegrainError::ShapeMismatch {
                what,
                expected,
                actual: img.dims(),
            });
        }
    }
    Ok(())
}

/// Per-pixel quantities that do not depend on the estimate.
struct FixedTerms {
    w: usize,
    /// `psi * C + 4 * I - sum_n I_n`
    anchor: Vec<Rgb>,
    /// `1 / (psi + 4 * phi)`
    inv_den: Vec<f32>,
}

impl FixedTerms {
    fn new(
        original: &RgbImageF32,
        color_matched: &RgbImageF32,
        shifts: &Shifts,
        psi: &ImageF32,
        phi: &ImageF32,
    ) -> Self {
        let n = original.data.len();
        let mut anchor = Vec::with_capacity(n);
        let mut inv_den = Vec::with_capacity(n);
        for i in 0..n {
            let p = psi.data[i];
            let o = original.data[i];
            let c = color_matched.data[i];
            let mut a = [0.0f32; 3];
            for (ch, out) in a.iter_mut().enumerate() {
                let neighbours: f32 = shifts.directions().iter().map(|d| d.data[i][ch]).sum();
                *out = p * c[ch] + 4.0 * o[ch] - neighbours;
            }
            anchor.push(a);
            inv_den.push(1.0 / (p + 4.0 * phi.data[i]));
        }
        Self {
            w: original.w,
            anchor,
            inv_den,
        }
    }
}

fn sweep(estimate: &RgbImageF32, terms: &FixedTerms, rho: f32) -> RgbImageF32 {
    let shifted = shift_image(estimate);
    let dirs = shifted.directions();
    let mut next = RgbImageF32::new(estimate.w, estimate.h);
    next.data
        .par_chunks_mut(terms.w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let start = y * terms.w;
            for (x, out) in out_row.iter_mut().enumerate() {
                let i = start + x;
                let prev = estimate.data[i];
                let anchor = terms.anchor[i];
                let inv_den = terms.inv_den[i];
                for ch in 0..3 {
                    let neighbours: f32 = dirs.iter().map(|d| d.data[i][ch]).sum();
                    let candidate = (anchor[ch] + neighbours) * inv_den;
                    out[ch] = (1.0 - rho) * candidate + rho * prev[ch];
                }
            }
        });
    next
}
