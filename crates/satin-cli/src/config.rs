//! TOML configuration deserialisation for sweep jobs.

use std::path::{Path, PathBuf};

use satin_core::{AxialDivision, ExecutionMode};
use serde::Deserialize;

/// Top-level job configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub numerics: NumericsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Record files to read.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Input-power file (default: "pin.dat").
    #[serde(default = "default_input_powers")]
    pub input_powers: PathBuf,
    /// Device file (default: "laser.dat").
    #[serde(default = "default_devices")]
    pub devices: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            input_powers: default_input_powers(),
            devices: default_devices(),
        }
    }
}

fn default_input_powers() -> PathBuf {
    PathBuf::from("pin.dat")
}
fn default_devices() -> PathBuf {
    PathBuf::from("laser.dat")
}

/// Scheduling of the two fan-out levels.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// One task per device (default: true).
    #[serde(default = "default_true")]
    pub parallel_devices: bool,
    /// One task per saturation intensity (default: true).
    #[serde(default = "default_true")]
    pub parallel_sweep: bool,
    /// Worker threads; 0 keeps Rayon's default of one per core.
    #[serde(default)]
    pub threads: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel_devices: true,
            parallel_sweep: true,
            threads: 0,
        }
    }
}

impl ExecutionConfig {
    pub fn mode(&self) -> ExecutionMode {
        ExecutionMode {
            parallel_devices: self.parallel_devices,
            parallel_sweep: self.parallel_sweep,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Numeric choices.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericsConfig {
    /// "float" (default) or "truncating".
    #[serde(default)]
    pub axial_division: AxialDivision,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Whether to write a JSON companion next to each report (default: false).
    #[serde(default)]
    pub save_json: bool,
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load `path` if given, otherwise fall back to the defaults.
pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<JobConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(JobConfig::default()),
    }
}
