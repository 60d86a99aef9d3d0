//! Compute backend trait and device abstraction.
//!
//! The [`ComputeBackend`] trait abstracts over serial and parallel execution
//! so that the integrator in `satin-core` stays scheduling-agnostic.

use std::sync::Arc;

use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Backend produced {produced} values, expected {expected}")]
    IncompleteFill { expected: usize, produced: usize },
}

/// Describes the capabilities of a compute backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub compute_units: Option<usize>,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Serial,
    Cpu,
}

/// Abstraction over compute backends.
///
/// The sweep engine hands each backend a fixed number of independent jobs,
/// addressed by index. Implementations decide whether the jobs run one after
/// another or concurrently, but must always return the values in index
/// order and only once every job has finished.
pub trait ComputeBackend: Send + Sync {
    /// Return information about the device.
    fn device_info(&self) -> DeviceInfo;

    /// Evaluate `fill_fn(i)` for every `i` in `0..len`.
    ///
    /// The returned vector has exactly `len` entries and entry `i` holds
    /// `fill_fn(i)`, independent of completion order.
    fn indexed_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError>;
}

/// Pick a backend for the requested scheduling.
///
/// `parallel = false` always yields the serial backend. A parallel request
/// fails when the crate was built without the `cpu` feature.
pub fn backend_for(parallel: bool) -> Result<Arc<dyn ComputeBackend>, ComputeError> {
    if !parallel {
        return Ok(Arc::new(crate::SerialBackend::new()));
    }

    #[cfg(feature = "cpu")]
    {
        Ok(Arc::new(crate::CpuBackend::new()))
    }
    #[cfg(not(feature = "cpu"))]
    {
        Err(ComputeError::Unavailable(
            "parallel execution requires the `cpu` feature".into(),
        ))
    }
}

/// Check that a backend returned one value per job.
pub(crate) fn ensure_complete(expected: usize, values: Vec<f64>) -> Result<Vec<f64>, ComputeError> {
    if values.len() != expected {
        return Err(ComputeError::IncompleteFill {
            expected,
            produced: values.len(),
        });
    }
    Ok(values)
}
