//! Core types shared across the Satin workspace.
//!
//! This module defines the data carried through the sweep pipeline: device
//! configurations, per-point results, execution mode and the run outcome.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A configured laser gain-medium setup with its own report destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Small-signal gain coefficient.
    pub small_signal_gain: f64,
    /// Pressure in the main discharge (kPa).
    pub discharge_pressure: i64,
    /// Where the device's report is written.
    pub output_path: PathBuf,
    /// Gas mix label, e.g. `"CO2/N2/He"`.
    pub gain_medium_label: String,
}

/// Output power for one (input power, saturation intensity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianResult {
    /// Input beam power (W).
    pub input_power: i64,
    /// Saturation intensity (W/cm²).
    pub saturation_intensity: i64,
    /// Integrated output beam power (W).
    pub output_power: f64,
}

impl GaussianResult {
    /// Natural log of the power gain, `ln(Pout/Pin)`.
    ///
    /// Non-positive input powers give a non-finite value; it is not checked.
    pub fn log_gain(&self) -> f64 {
        (self.output_power / self.input_power as f64).ln()
    }

    /// Absolute power gain, `Pout - Pin`.
    pub fn power_gain(&self) -> f64 {
        self.output_power - self.input_power as f64
    }
}

/// Which fan-out levels run concurrently.
///
/// Chosen once at startup and fixed for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMode {
    /// One concurrent unit per device.
    pub parallel_devices: bool,
    /// One concurrent unit per saturation-intensity sweep point.
    pub parallel_sweep: bool,
}

impl ExecutionMode {
    /// Everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel_devices: false,
            parallel_sweep: false,
        }
    }

    /// Both fan-out levels enabled.
    pub fn parallel() -> Self {
        Self {
            parallel_devices: true,
            parallel_sweep: true,
        }
    }

    /// Both levels on when `concurrent`, both off otherwise.
    pub fn from_concurrent(concurrent: bool) -> Self {
        if concurrent {
            Self::parallel()
        } else {
            Self::sequential()
        }
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::parallel()
    }
}

/// Completion tally for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// (device, input power) units reported complete.
    pub completed: usize,
    /// `device_count * input_power_count`.
    pub expected: usize,
}

impl RunOutcome {
    pub fn new(completed: usize, device_count: usize, input_power_count: usize) -> Self {
        Self {
            completed,
            expected: device_count * input_power_count,
        }
    }

    /// True iff every (device, input power) unit completed.
    pub fn is_success(&self) -> bool {
        self.completed == self.expected
    }
}
