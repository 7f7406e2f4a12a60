//! Coarse-to-fine scheduling of the relaxation solver.
//!
//! Each level halves both sides of its parent (rounding up) using bilinear
//! resampling, so level `k` has roughly `1 / 4^k` of the pixels. The
//! coarsest level is solved first from a resized copy of the seed; its
//! solution is upsampled to seed the next finer level, and so on up to full
//! resolution. Depth is bounded both by the iteration schedule (one entry per
//! level) and by a minimum side length.

pub mod resize;
pub mod schedule;
pub mod scheduler;

pub use resize::{half_size, resize_bilinear};
pub use schedule::{
    level_sizes, should_descend, IterationSchedule, DEFAULT_MIN_DIMENSION, DEFAULT_SCHEDULE,
};
pub use scheduler::{solve_pyramid, PyramidScheduler};
