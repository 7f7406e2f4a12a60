//! Entry point: normalize the inputs, seed with the original and run the
//! pyramid.
use crate::diagnostics::{RegrainReport, StageTiming, TimingBreakdown};
use crate::error::Result;
use crate::image::{ImageView, RgbImageF32, RgbImageU8};
use crate::pyramid::{IterationSchedule, PyramidScheduler, DEFAULT_MIN_DIMENSION};
use crate::solver::{RelaxationSolver, SolverOptions};
use crate::weights::{ConstantField, RegularizationField};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Tunables of a regrain run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegrainParams {
    /// Sweeps per pyramid level, finest first.
    pub schedule: IterationSchedule,
    /// Coarse levels keep both sides strictly above this size.
    pub min_dimension: usize,
    pub solver: SolverOptions,
}

impl Default for RegrainParams {
    fn default() -> Self {
        Self {
            schedule: IterationSchedule::default(),
            min_dimension: DEFAULT_MIN_DIMENSION,
            solver: SolverOptions::default(),
        }
    }
}

/// Regrained image in `[0, 1]` (not clamped) with the run's trace.
#[derive(Clone, Debug)]
pub struct RegrainOutput {
    pub image: RgbImageF32,
    pub report: RegrainReport,
}

pub struct Regrainer {
    params: RegrainParams,
    phi: Box<dyn RegularizationField>,
}

impl std::fmt::Debug for Regrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regrainer")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Default for Regrainer {
    fn default() -> Self {
        Self::new(RegrainParams::default())
    }
}

impl Regrainer {
    pub fn new(params: RegrainParams) -> Self {
        Self {
            params,
            phi: Box::new(ConstantField::default()),
        }
    }

    /// Replace the smoothness weight strategy (constant 1 by default).
    pub fn with_regularization(mut self, phi: impl RegularizationField + 'static) -> Self {
        self.phi = Box::new(phi);
        self
    }

    pub fn params(&self) -> &RegrainParams {
        &self.params
    }

    /// Regrain 8-bit inputs. Both images are normalized to `[0, 1]` first.
    pub fn regrain(
        &self,
        original: RgbImageU8<'_>,
        color_matched: RgbImageU8<'_>,
    ) -> Result<RegrainOutput> {
        let start = Instant::now();
        let original = RgbImageF32::from_u8(original);
        let color_matched = RgbImageF32::from_u8(color_matched);
        let normalize_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut out = self.regrain_f32(&original, &color_matched)?;
        out.report.timing.total_ms += normalize_ms;
        out.report
            .timing
            .stages
            .insert(0, StageTiming::new("normalize", normalize_ms));
        Ok(out)
    }

    /// Regrain images already normalized to `[0, 1]`.
    pub fn regrain_f32(
        &self,
        original: &RgbImageF32,
        color_matched: &RgbImageF32,
    ) -> Result<RegrainOutput> {
        let (w, h) = original.dims();
        debug!(
            "Regrainer::regrain {}x{} schedule={:?} min_dimension={}",
            w,
            h,
            self.params.schedule.as_slice(),
            self.params.min_dimension
        );

        let solver = RelaxationSolver::new(self.params.solver, self.phi.as_ref());
        let scheduler = PyramidScheduler::new(solver, self.params.min_dimension);

        let start = Instant::now();
        let mut levels = Vec::with_capacity(self.params.schedule.len());
        let image = scheduler.solve(
            original.clone(),
            original,
            color_matched,
            &self.params.schedule,
            &mut levels,
        )?;
        let pyramid_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut timing = TimingBreakdown::with_total(pyramid_ms);
        timing.push("pyramid", pyramid_ms);

        Ok(RegrainOutput {
            image,
            report: RegrainReport {
                width: w,
                height: h,
                min_dimension: self.params.min_dimension,
                schedule: self.params.schedule.as_slice().to_vec(),
                levels,
                timing,
            },
        })
    }
}

/// Regrain 8-bit inputs with `params` and the constant phi.
pub fn regrain(
    original: RgbImageU8<'_>,
    color_matched: RgbImageU8<'_>,
    params: &RegrainParams,
) -> Result<RgbImageF32> {
    Regrainer::new(params.clone())
        .regrain(original, color_matched)
        .map(|out| out.image)
}
