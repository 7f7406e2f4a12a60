//! Error taxonomy of the regraining pipeline.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegrainError>;

#[derive(Debug, Error)]
pub enum RegrainError {
    /// An input image could not be read or decoded.
    #[error("Failed to open {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// An output image or report could not be written.
    #[error("Failed to write {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    /// Images taking part in one solve disagree in size.
    #[error("{what} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The iteration schedule has no entries.
    #[error("iteration schedule must contain at least one level")]
    EmptySchedule,

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// A raw 8-bit buffer is too short for its declared dimensions.
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// A weight field contains negative or non-finite values.
    #[error("invalid weight field: {0}")]
    InvalidField(String),

    #[error("{0}")]
    Config(String),
}
