//! Serial backend: runs jobs in index order on the calling thread.

use crate::backend::{ensure_complete, BackendType, ComputeBackend, ComputeError, DeviceInfo};

/// Backend that evaluates every job sequentially.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial (calling thread)".into(),
            backend_type: BackendType::Serial,
            compute_units: Some(1),
        }
    }

    fn indexed_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError> {
        let values: Vec<f64> = (0..len).map(fill_fn).collect();
        ensure_complete(len, values)
    }
}
