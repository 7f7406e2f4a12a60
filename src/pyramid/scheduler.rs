use super::resize::{half_size, resize_bilinear};
use super::schedule::{should_descend, IterationSchedule};
use crate::diagnostics::LevelReport;
use crate::error::Result;
use crate::image::{ImageView, RgbImageF32};
use crate::solver::{check_shapes, RelaxationSolver, SolverOptions};
use crate::weights::ConstantField;
use log::debug;
use std::time::Instant;

/// Coarse-to-fine driver of the relaxation solver.
///
/// A level first solves a half-size copy of its problem (recursively, one
/// schedule entry per level), upsamples that solution as its seed and then
/// runs its own budget of sweeps. Every level owns its resized copies; only
/// the returned estimate flows back to the caller.
#[derive(Clone, Copy, Debug)]
pub struct PyramidScheduler<'a> {
    solver: RelaxationSolver<'a>,
    min_dimension: usize,
}

impl<'a> PyramidScheduler<'a> {
    pub fn new(solver: RelaxationSolver<'a>, min_dimension: usize) -> Self {
        Self {
            solver,
            min_dimension,
        }
    }

    pub fn min_dimension(&self) -> usize {
        self.min_dimension
    }

    /// Solve the full pyramid below `original`'s resolution, starting from
    /// `seed`. One `LevelReport` per solved level is appended to `trace`,
    /// coarsest first.
    pub fn solve(
        &self,
        seed: RgbImageF32,
        original: &RgbImageF32,
        color_matched: &RgbImageF32,
        schedule: &IterationSchedule,
        trace: &mut Vec<LevelReport>,
    ) -> Result<RgbImageF32> {
        check_shapes(original, color_matched, &seed)?;
        self.solve_level(seed, original, color_matched, schedule.as_slice(), 0, trace)
    }

    fn solve_level(
        &self,
        seed: RgbImageF32,
        original: &RgbImageF32,
        color_matched: &RgbImageF32,
        budgets: &[usize],
        level: usize,
        trace: &mut Vec<LevelReport>,
    ) -> Result<RgbImageF32> {
        let (w, h) = original.dims();
        let seed = if should_descend(budgets.len(), w, h, self.min_dimension) {
            let (cw, ch) = half_size(w, h);
            debug!(
                "PyramidScheduler level={} {}x{} -> {}x{}",
                level, w, h, cw, ch
            );
            let coarse = self.solve_level(
                resize_bilinear(&seed, cw, ch),
                &resize_bilinear(original, cw, ch),
                &resize_bilinear(color_matched, cw, ch),
                &budgets[1..],
                level + 1,
                trace,
            )?;
            resize_bilinear(&coarse, w, h)
        } else {
            seed
        };

        let iterations = budgets[0];
        let start = Instant::now();
        let solution = self
            .solver
            .solve(original, color_matched, seed, iterations, level)?;
        trace.push(LevelReport {
            level_index: level,
            width: w,
            height: h,
            iterations,
            mean_edge_weight: solution.mean_edge_weight,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        Ok(solution.image)
    }
}

/// Run the pyramid with the default constant phi and no trace.
pub fn solve_pyramid(
    seed: RgbImageF32,
    original: &RgbImageF32,
    color_matched: &RgbImageF32,
    schedule: &IterationSchedule,
    min_dimension: usize,
    options: &SolverOptions,
) -> Result<RgbImageF32> {
    let phi = ConstantField::default();
    let scheduler = PyramidScheduler::new(RelaxationSolver::new(*options, &phi), min_dimension);
    let mut trace = Vec::new();
    scheduler.solve(seed, original, color_matched, schedule, &mut trace)
}
