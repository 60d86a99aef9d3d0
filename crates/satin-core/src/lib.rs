//! # Satin Core
//!
//! The numerical backbone of Satin. This crate computes the output power of
//! a saturated gaussian CO₂ laser beam for a set of devices, input powers and
//! a fixed sweep of saturation intensities, and writes one report per device.
//!
//! ## Architecture
//!
//! Work is split at two independent levels, each of which can run serially
//! or in parallel:
//!
//! - [`coordinator::RunCoordinator`] fans out over devices.
//! - [`sweep::SaturationSweep`] fans out over the 16 saturation intensities
//!   of one input power, through a `satin_compute::ComputeBackend`.
//!
//! ## Modules
//!
//! - [`constants`] — Beam geometry and integration steps.
//! - [`types`] — Device configuration, results, execution mode, run outcome.
//! - [`profile`] — Axial correction table.
//! - [`integrator`] — Radius × axial double integral for one sweep point.
//! - [`sweep`] — The 16-point saturation sweep.
//! - [`report`] — Report text layout and timestamp source.
//! - [`device`] — Per-device processing and report writing.
//! - [`coordinator`] — Device fan-out and completeness check.

pub mod constants;
pub mod coordinator;
pub mod device;
pub mod integrator;
pub mod profile;
pub mod report;
pub mod sweep;
pub mod types;

pub use coordinator::{RunCoordinator, RunError};
pub use device::{DeviceProcessor, GaussianDeviceProcessor, ProcessError};
pub use integrator::BeamIntegrator;
pub use profile::{AxialDivision, AxialProfile};
pub use report::{FixedClock, ReportClock, SystemClock};
pub use sweep::{SaturationSweep, SATURATION_INTENSITIES, SWEEP_LEN};
pub use types::{DeviceConfig, ExecutionMode, GaussianResult, RunOutcome};

use std::sync::Arc;

/// Assemble the production pipeline for one run.
///
/// Builds the axial profile once, picks the sweep backend from `mode`, and
/// wraps everything in a coordinator ready to [`RunCoordinator::run`].
pub fn build_coordinator(
    mode: ExecutionMode,
    division: AxialDivision,
    clock: Arc<dyn ReportClock>,
    save_json: bool,
) -> Result<RunCoordinator<GaussianDeviceProcessor>, satin_compute::ComputeError> {
    let profile = Arc::new(AxialProfile::new(division));
    log::debug!(
        "Axial profile: {} samples, {:?} division",
        profile.len(),
        profile.division()
    );

    let backend = satin_compute::backend_for(mode.parallel_sweep)?;
    let info = backend.device_info();
    log::debug!(
        "Sweep backend: {} ({} compute units)",
        info.name,
        info.compute_units.unwrap_or(1)
    );

    let sweep = SaturationSweep::new(BeamIntegrator::new(profile), backend);
    let processor = GaussianDeviceProcessor::new(sweep, clock).with_json(save_json);
    Ok(RunCoordinator::new(processor, mode.parallel_devices))
}
