//! Run wiring: configuration, record files, thread pool and coordinator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use satin_core::{build_coordinator, AxialDivision, ExecutionMode, RunOutcome, SystemClock};

use crate::config::JobConfig;

/// Command-line values that take precedence over the job file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub concurrent: Option<bool>,
    pub input_powers: Option<PathBuf>,
    pub devices: Option<PathBuf>,
    pub threads: Option<usize>,
}

/// A job with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    pub input_powers: PathBuf,
    pub devices: PathBuf,
    pub mode: ExecutionMode,
    pub threads: usize,
    pub division: AxialDivision,
    pub save_json: bool,
}

impl ResolvedJob {
    pub fn new(job: JobConfig, overrides: Overrides) -> Self {
        let mode = match overrides.concurrent {
            Some(concurrent) => ExecutionMode::from_concurrent(concurrent),
            None => job.execution.mode(),
        };
        Self {
            input_powers: overrides.input_powers.unwrap_or(job.inputs.input_powers),
            devices: overrides.devices.unwrap_or(job.inputs.devices),
            mode,
            threads: overrides.threads.unwrap_or(job.execution.threads),
            division: job.numerics.axial_division,
            save_json: job.output.save_json,
        }
    }
}

/// Parsed record files.
pub struct Records {
    pub input_powers: Vec<i64>,
    pub devices: Vec<satin_core::DeviceConfig>,
}

/// Read both record files; any failure is fatal.
pub fn load_records(job: &ResolvedJob) -> Result<Records> {
    let input_powers = satin_records::load_input_powers(&job.input_powers)
        .with_context(|| format!("Loading input powers from {}", job.input_powers.display()))?;
    let devices = satin_records::load_devices(&job.devices)
        .with_context(|| format!("Loading devices from {}", job.devices.display()))?;

    if input_powers.iter().any(|&p| p <= 0) {
        log::warn!("Non-positive input powers present; their ln(Pout/Pin) will not be finite");
    }

    Ok(Records {
        input_powers,
        devices,
    })
}

/// Size the global Rayon pool. Only the first call in a process takes effect.
fn configure_threads(threads: usize) {
    if threads == 0 {
        return;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        Ok(()) => log::info!("Using {} worker threads", threads),
        Err(e) => log::warn!("Could not resize thread pool: {}", e),
    }
}

/// Run the full sweep for every device and return the completion tally.
pub fn run_job(job: &ResolvedJob) -> Result<RunOutcome> {
    configure_threads(job.threads);

    let records = load_records(job)?;
    println!(
        "Devices: {}, input powers: {}, sweep points: {}",
        records.devices.len(),
        records.input_powers.len(),
        satin_core::SWEEP_LEN
    );
    println!(
        "Mode: devices {}, sweep {}",
        describe(job.mode.parallel_devices),
        describe(job.mode.parallel_sweep)
    );

    let coordinator = build_coordinator(job.mode, job.division, Arc::new(SystemClock), job.save_json)
        .context("Selecting compute backend")?;

    let outcome = coordinator.run(&records.devices, &records.input_powers)?;
    Ok(outcome)
}

fn describe(parallel: bool) -> &'static str {
    if parallel {
        "parallel"
    } else {
        "sequential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JobConfig;

    #[test]
    fn test_concurrent_flag_overrides_both_levels() {
        let job = ResolvedJob::new(
            JobConfig::default(),
            Overrides {
                concurrent: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(job.mode, ExecutionMode::sequential());
        assert_eq!(job.input_powers, PathBuf::from("pin.dat"));
    }

    #[test]
    fn test_path_overrides() {
        let job = ResolvedJob::new(
            JobConfig::default(),
            Overrides {
                input_powers: Some(PathBuf::from("a.dat")),
                devices: Some(PathBuf::from("b.dat")),
                threads: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(job.input_powers, PathBuf::from("a.dat"));
        assert_eq!(job.devices, PathBuf::from("b.dat"));
        assert_eq!(job.threads, 2);
        assert_eq!(job.mode, ExecutionMode::parallel());
    }

    #[test]
    fn test_run_job_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let pin = dir.path().join("pin.dat");
        let laser = dir.path().join("laser.dat");
        let report_a = dir.path().join("a.out");
        let report_b = dir.path().join("b.out");
        std::fs::write(&pin, "100\n200\n").unwrap();
        std::fs::write(
            &laser,
            format!(
                "{} 20.0 150 CO2/N2/He\n{} 18.0 120 CO2/He\n",
                report_a.display(),
                report_b.display()
            ),
        )
        .unwrap();

        let job = ResolvedJob::new(
            JobConfig::default(),
            Overrides {
                input_powers: Some(pin),
                devices: Some(laser),
                ..Default::default()
            },
        );
        let outcome = run_job(&job).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.completed, 4);
        assert!(std::fs::read_to_string(report_b).unwrap().contains("CO2 via CO2/He"));
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let job = ResolvedJob::new(
            JobConfig::default(),
            Overrides {
                input_powers: Some(dir.path().join("missing.dat")),
                devices: Some(dir.path().join("laser.dat")),
                ..Default::default()
            },
        );
        let err = run_job(&job).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.dat"));
    }
}
