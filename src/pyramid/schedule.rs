//! Per-level iteration budgets and the pyramid descent rule.
use super::resize::half_size;
use crate::error::{RegrainError, Result};
use serde::{Deserialize, Serialize};

/// Default budgets, finest level first.
pub const DEFAULT_SCHEDULE: [usize; 6] = [4, 16, 32, 64, 64, 64];

/// Sides at or below this size are never produced by downsampling.
pub const DEFAULT_MIN_DIMENSION: usize = 20;

/// Relaxation sweeps per pyramid level, finest level first.
///
/// Entry `k` is the budget of the level halved `k` times. The schedule also
/// caps the pyramid depth at `len()` levels. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct IterationSchedule(Vec<usize>);

impl IterationSchedule {
    pub fn new(iterations: Vec<usize>) -> Result<Self> {
        if iterations.is_empty() {
            return Err(RegrainError::EmptySchedule);
        }
        Ok(Self(iterations))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Budget of the finest level.
    pub fn first(&self) -> usize {
        self.0[0]
    }
}

impl Default for IterationSchedule {
    fn default() -> Self {
        Self(DEFAULT_SCHEDULE.to_vec())
    }
}

impl TryFrom<Vec<usize>> for IterationSchedule {
    type Error = RegrainError;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<IterationSchedule> for Vec<usize> {
    fn from(value: IterationSchedule) -> Self {
        value.0
    }
}

/// Whether a level of size `w × h` with `remaining` schedule entries (its
/// own included) solves a half-size level first.
///
/// True iff another budget is left and both halved sides stay strictly
/// above `min_dimension`.
pub fn should_descend(remaining: usize, w: usize, h: usize, min_dimension: usize) -> bool {
    let (hw, hh) = half_size(w, h);
    remaining > 1 && hw > min_dimension && hh > min_dimension
}

/// Sizes of every level the scheduler will solve, finest first.
pub fn level_sizes(
    schedule: &IterationSchedule,
    w: usize,
    h: usize,
    min_dimension: usize,
) -> Vec<(usize, usize)> {
    let mut sizes = vec![(w, h)];
    let (mut cw, mut ch) = (w, h);
    let mut remaining = schedule.len();
    while should_descend(remaining, cw, ch, min_dimension) {
        (cw, ch) = half_size(cw, ch);
        sizes.push((cw, ch));
        remaining -= 1;
    }
    sizes
}
