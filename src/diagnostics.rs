//! Structured report of a regrain run, serializable for tooling.
use serde::{Deserialize, Serialize};

/// One solved pyramid level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReport {
    /// 0 is full resolution, each step halves both sides.
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    pub iterations: usize,
    /// Mean edge weight (psi) of the level's original.
    pub mean_edge_weight: f32,
    pub elapsed_ms: f64,
}

/// Timing entry describing a single stage of a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Per-level trace of a regrain run.
///
/// `levels` is in solve order: coarsest level first, full resolution last.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegrainReport {
    pub width: usize,
    pub height: usize,
    pub min_dimension: usize,
    pub schedule: Vec<usize>,
    pub levels: Vec<LevelReport>,
    pub timing: TimingBreakdown,
}

impl RegrainReport {
    /// Number of pyramid levels that were solved.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn total_iterations(&self) -> usize {
        self.levels.iter().map(|l| l.iterations).sum()
    }
}
