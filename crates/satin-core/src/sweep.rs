//! Saturation-intensity sweep.
//!
//! For one input power the integrator is evaluated at each of the 16 fixed
//! saturation intensities. The points are independent, so the work is handed
//! to a [`ComputeBackend`] as 16 indexed jobs; the backend returns only after
//! all of them finish and slot `i` always belongs to sweep point `i`.

use std::sync::Arc;

use satin_compute::{ComputeBackend, ComputeError};

use crate::integrator::BeamIntegrator;
use crate::types::GaussianResult;

/// Number of points in the sweep.
pub const SWEEP_LEN: usize = 16;

/// First saturation intensity (W/cm²).
pub const SWEEP_START: i64 = 10_000;

/// Spacing between sweep points (W/cm²).
pub const SWEEP_STEP: i64 = 1_000;

/// The sweep values 10000, 11000, …, 25000 in ascending order.
pub const SATURATION_INTENSITIES: [i64; SWEEP_LEN] = {
    let mut values = [0; SWEEP_LEN];
    let mut i = 0;
    while i < SWEEP_LEN {
        values[i] = SWEEP_START + SWEEP_STEP * i as i64;
        i += 1;
    }
    values
};

/// Runs the integrator over the whole sweep for one input power at a time.
#[derive(Clone)]
pub struct SaturationSweep {
    integrator: BeamIntegrator,
    backend: Arc<dyn ComputeBackend>,
}

impl SaturationSweep {
    pub fn new(integrator: BeamIntegrator, backend: Arc<dyn ComputeBackend>) -> Self {
        Self {
            integrator,
            backend,
        }
    }

    pub fn integrator(&self) -> &BeamIntegrator {
        &self.integrator
    }

    /// Evaluate all 16 sweep points for `input_power`.
    ///
    /// The result is ordered by ascending saturation intensity regardless of
    /// which point finished first.
    pub fn run(
        &self,
        input_power: i64,
        small_signal_gain: f64,
    ) -> Result<Vec<GaussianResult>, ComputeError> {
        let integrator = &self.integrator;
        let powers = self.backend.indexed_fill(SWEEP_LEN, &|i: usize| {
            integrator.output_power(
                input_power,
                SATURATION_INTENSITIES[i] as f64,
                small_signal_gain,
            )
        })?;

        Ok(SATURATION_INTENSITIES
            .iter()
            .zip(powers)
            .map(|(&saturation_intensity, output_power)| GaussianResult {
                input_power,
                saturation_intensity,
                output_power,
            })
            .collect())
    }
}

impl std::fmt::Debug for SaturationSweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaturationSweep")
            .field("integrator", &self.integrator)
            .field("backend", &self.backend.device_info().name)
            .finish()
    }
}
