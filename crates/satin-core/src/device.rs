//! Device processing: one report per device.
//!
//! The [`DeviceProcessor`] trait is the unit of work the run coordinator fans
//! out. [`GaussianDeviceProcessor`] is the production implementation; tests
//! substitute stubs to exercise the coordinator's completeness check.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use satin_compute::ComputeError;
use serde::Serialize;
use thiserror::Error;

use crate::report::{self, ReportClock};
use crate::sweep::SaturationSweep;
use crate::types::{DeviceConfig, GaussianResult};

/// Errors raised while processing a single device.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to write report '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialise results for '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sweep failed at input power {input_power} W: {source}")]
    Sweep {
        input_power: i64,
        #[source]
        source: ComputeError,
    },
}

/// Processes every input power for one device.
pub trait DeviceProcessor: Send + Sync {
    /// Process `device` over `input_powers` and return how many input powers
    /// were fully processed.
    fn process(&self, device: &DeviceConfig, input_powers: &[i64]) -> Result<usize, ProcessError>;
}

/// JSON companion document written next to a report.
#[derive(Debug, Serialize)]
struct DeviceResults<'a> {
    device: &'a DeviceConfig,
    results: &'a [GaussianResult],
}

/// Runs the saturation sweep for each input power and writes the report.
pub struct GaussianDeviceProcessor {
    sweep: SaturationSweep,
    clock: Arc<dyn ReportClock>,
    save_json: bool,
}

impl GaussianDeviceProcessor {
    pub fn new(sweep: SaturationSweep, clock: Arc<dyn ReportClock>) -> Self {
        Self {
            sweep,
            clock,
            save_json: false,
        }
    }

    /// Also write `<output_path>.json` with the device and all its results.
    pub fn with_json(mut self, save_json: bool) -> Self {
        self.save_json = save_json;
        self
    }

    fn write_report(
        &self,
        device: &DeviceConfig,
        input_powers: &[i64],
        results: &mut Vec<GaussianResult>,
    ) -> Result<usize, ProcessError> {
        let path = &device.output_path;
        let io_err = |source| ProcessError::Io {
            path: path.clone(),
            source,
        };

        // `File::create` truncates, so an earlier report is replaced.
        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);

        report::write_header(&mut out, device, &self.clock.timestamp()).map_err(io_err)?;

        let mut processed = 0;
        for &input_power in input_powers {
            let block = self
                .sweep
                .run(input_power, device.small_signal_gain)
                .map_err(|source| ProcessError::Sweep {
                    input_power,
                    source,
                })?;
            report::write_rows(&mut out, &block).map_err(io_err)?;
            log::debug!(
                "{}: input power {} W done ({} sweep points)",
                path.display(),
                input_power,
                block.len()
            );
            results.extend(block);
            processed += 1;
        }

        report::write_footer(&mut out, &self.clock.timestamp()).map_err(io_err)?;
        out.flush().map_err(io_err)?;
        Ok(processed)
    }
}

impl DeviceProcessor for GaussianDeviceProcessor {
    fn process(&self, device: &DeviceConfig, input_powers: &[i64]) -> Result<usize, ProcessError> {
        log::info!(
            "Processing device '{}' (gain={}, pressure={} kPa, {} input powers)",
            device.output_path.display(),
            device.small_signal_gain,
            device.discharge_pressure,
            input_powers.len()
        );

        let mut results = Vec::with_capacity(input_powers.len() * crate::sweep::SWEEP_LEN);
        let processed = self.write_report(device, input_powers, &mut results)?;

        if self.save_json {
            write_json(&json_path(&device.output_path), device, &results)?;
        }

        log::info!("Report written to: {}", device.output_path.display());
        Ok(processed)
    }
}

/// Path of the JSON companion for a report at `report_path`.
pub fn json_path(report_path: &Path) -> PathBuf {
    let mut name = report_path.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

fn write_json(path: &Path, device: &DeviceConfig, results: &[GaussianResult]) -> Result<(), ProcessError> {
    let json = serde_json::to_string_pretty(&DeviceResults { device, results }).map_err(|source| {
        ProcessError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    std::fs::write(path, json).map_err(|source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::BeamIntegrator;
    use crate::profile::AxialProfile;
    use crate::report::FixedClock;
    use satin_compute::SerialBackend;

    fn processor() -> GaussianDeviceProcessor {
        let sweep = SaturationSweep::new(
            BeamIntegrator::new(Arc::new(AxialProfile::default())),
            Arc::new(SerialBackend::new()),
        );
        GaussianDeviceProcessor::new(sweep, Arc::new(FixedClock("T".into())))
    }

    fn device(path: PathBuf) -> DeviceConfig {
        DeviceConfig {
            small_signal_gain: 20.0,
            discharge_pressure: 150,
            output_path: path,
            gain_medium_label: "CO2/N2/He".into(),
        }
    }

    #[test]
    fn test_json_path_appends_extension() {
        assert_eq!(json_path(Path::new("out/p1.out")), PathBuf::from("out/p1.out.json"));
    }

    #[test]
    fn test_existing_report_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.out");
        std::fs::write(&path, "stale contents that must disappear\n".repeat(100)).unwrap();

        let count = processor().process(&device(path.clone()), &[100]).unwrap();
        assert_eq!(count, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Start date: T\n"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("p.out");
        let err = processor().process(&device(path), &[100]).unwrap_err();
        assert!(matches!(err, ProcessError::Io { .. }));
    }

    #[test]
    fn test_json_companion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.out");
        processor()
            .with_json(true)
            .process(&device(path.clone()), &[100, 200])
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json_path(&path)).unwrap()).unwrap();
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 32);
        assert_eq!(results[16]["input_power"], 200);
        assert_eq!(json["device"]["discharge_pressure"], 150);
    }
}
