pub mod regrain;

pub use regrain::{load_config, OutputConfig, RegrainToolConfig};
