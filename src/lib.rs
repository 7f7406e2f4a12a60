#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod regrain;

// Solver building blocks; public for tooling and tests.
pub mod pyramid;
pub mod shift;
pub mod solver;
pub mod weights;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{RegrainError, Result};
pub use crate::regrain::{regrain, RegrainOutput, RegrainParams, Regrainer};

pub use crate::diagnostics::{LevelReport, RegrainReport};
pub use crate::pyramid::{solve_pyramid, IterationSchedule, PyramidScheduler};
pub use crate::shift::{shift_image, Shifts};
pub use crate::solver::{solve, RelaxationSolver, SolverOptions};
pub use crate::weights::{ConstantField, RegularizationField};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use regrain::prelude::*;
///
/// # fn main() -> regrain::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let original = vec![128u8; w * h * 3];
/// let matched = vec![150u8; w * h * 3];
///
/// let regrainer = Regrainer::new(RegrainParams::default());
/// let out = regrainer.regrain(
///     RgbImageU8::new(w, h, &original)?,
///     RgbImageU8::new(w, h, &matched)?,
/// )?;
/// println!("levels={} total_ms={:.3}", out.report.depth(), out.report.timing.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{RgbImageF32, RgbImageU8};
    pub use crate::{IterationSchedule, RegrainOutput, RegrainParams, Regrainer};
}
