//! Run coordination across devices.
//!
//! In sequential mode devices are processed one after another in listed
//! order. In parallel mode every device becomes its own Rayon task; each task
//! sends exactly one message on a completion channel sized to the device
//! count, and the coordinator drains one message per device once all tasks
//! have joined. The channel is created per run and never outlives it.

use std::path::PathBuf;
use std::sync::mpsc;

use thiserror::Error;

use crate::device::{DeviceProcessor, ProcessError};
use crate::types::{DeviceConfig, RunOutcome};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Device '{}' failed: {source}", .output_path.display())]
    Device {
        output_path: PathBuf,
        #[source]
        source: ProcessError,
    },
}

/// Fans a [`DeviceProcessor`] out over all devices.
pub struct RunCoordinator<P> {
    processor: P,
    parallel_devices: bool,
}

impl<P: DeviceProcessor> RunCoordinator<P> {
    pub fn new(processor: P, parallel_devices: bool) -> Self {
        Self {
            processor,
            parallel_devices,
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Process every device and tally the completed (device, input power)
    /// units.
    ///
    /// A processor error is fatal and returned as [`RunError`]; a processor
    /// that reports fewer input powers than it was given only shows up as an
    /// unsuccessful [`RunOutcome`].
    pub fn run(&self, devices: &[DeviceConfig], input_powers: &[i64]) -> Result<RunOutcome, RunError> {
        log::info!(
            "Running {} device(s) x {} input power(s), {} mode",
            devices.len(),
            input_powers.len(),
            if self.parallel_devices { "parallel" } else { "sequential" }
        );

        let completed = if self.parallel_devices {
            self.run_parallel(devices, input_powers)?
        } else {
            self.run_sequential(devices, input_powers)?
        };

        let outcome = RunOutcome::new(completed, devices.len(), input_powers.len());
        if outcome.is_success() {
            log::info!("Run complete: {}/{} units", outcome.completed, outcome.expected);
        } else {
            log::warn!(
                "Run incomplete: {}/{} units",
                outcome.completed,
                outcome.expected
            );
        }
        Ok(outcome)
    }

    fn run_sequential(&self, devices: &[DeviceConfig], input_powers: &[i64]) -> Result<usize, RunError> {
        let mut completed = 0;
        for device in devices {
            completed += self
                .processor
                .process(device, input_powers)
                .map_err(|source| device_error(device, source))?;
        }
        Ok(completed)
    }

    fn run_parallel(&self, devices: &[DeviceConfig], input_powers: &[i64]) -> Result<usize, RunError> {
        let (tx, rx) = mpsc::sync_channel::<(usize, Result<usize, ProcessError>)>(devices.len());
        let processor = &self.processor;

        // The senders move into the scope and are all dropped by the time it
        // returns, so a missing message ends the drain instead of hanging it.
        rayon::scope(move |s| {
            for (idx, device) in devices.iter().enumerate() {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // Capacity equals the device count, so this never blocks.
                    let _ = tx.send((idx, processor.process(device, input_powers)));
                });
            }
        });

        let mut completed = 0;
        let mut first_error: Option<(usize, ProcessError)> = None;
        for _ in 0..devices.len() {
            let Ok((idx, result)) = rx.recv() else {
                break;
            };
            match result {
                Ok(count) => completed += count,
                Err(e) => {
                    log::error!("Device '{}' failed: {}", devices[idx].output_path.display(), e);
                    if first_error.as_ref().map_or(true, |(first, _)| idx < *first) {
                        first_error = Some((idx, e));
                    }
                }
            }
        }

        match first_error {
            Some((idx, source)) => Err(device_error(&devices[idx], source)),
            None => Ok(completed),
        }
    }
}

fn device_error(device: &DeviceConfig, source: ProcessError) -> RunError {
    RunError::Device {
        output_path: device.output_path.clone(),
        source,
    }
}
