use crate::error::{RegrainError, Result};
use crate::regrain::RegrainParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `regrain_demo` tool.
#[derive(Debug, Deserialize)]
pub struct RegrainToolConfig {
    /// Image before colour transfer.
    pub original: PathBuf,
    /// Same image after colour transfer.
    pub color_matched: PathBuf,
    #[serde(default)]
    pub params: RegrainParams,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RegrainToolConfig> {
    let data = fs::read_to_string(path).map_err(|e| {
        RegrainError::Config(format!("Failed to read config {}: {e}", path.display()))
    })?;
    parse_config(&data)
        .map_err(|e| RegrainError::Config(format!("Failed to parse config {}: {e}", path.display())))
}

fn parse_config(data: &str) -> serde_json::Result<RegrainToolConfig> {
    serde_json::from_str(data)
}
