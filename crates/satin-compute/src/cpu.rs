//! CPU compute backend using Rayon for shared-memory parallelism.

use crate::backend::{ensure_complete, BackendType, ComputeBackend, ComputeError, DeviceInfo};

/// CPU backend that runs each job as its own Rayon task.
///
/// Jobs are scheduled on the global Rayon pool, so nesting this backend
/// inside an outer Rayon fan-out shares the same worker threads.
pub struct CpuBackend {
    num_threads: usize,
}

impl CpuBackend {
    /// Create a new CPU backend on the global Rayon pool.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
        }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            backend_type: BackendType::Cpu,
            compute_units: Some(self.num_threads),
        }
    }

    fn indexed_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError> {
        use rayon::prelude::*;

        // Indexed collect writes each value into its own slot and returns
        // only after every task has joined.
        let values: Vec<f64> = (0..len)
            .into_par_iter()
            .with_max_len(1)
            .map(|idx| fill_fn(idx))
            .collect();

        ensure_complete(len, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerialBackend;

    #[test]
    fn test_cpu_fill_preserves_index_order() {
        let cpu = CpuBackend::new();
        let values = cpu.indexed_fill(16, &|i: usize| (i * i) as f64).unwrap();
        let expected: Vec<f64> = (0..16).map(|i| (i * i) as f64).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_cpu_matches_serial() {
        let f = |i: usize| ((i as f64) * 0.37).sin();
        let cpu = CpuBackend::new().indexed_fill(64, &f).unwrap();
        let serial = SerialBackend::new().indexed_fill(64, &f).unwrap();
        assert_eq!(cpu, serial);
    }

    #[test]
    fn test_empty_fill() {
        let values = CpuBackend::new().indexed_fill(0, &|_: usize| 1.0).unwrap();
        assert!(values.is_empty());
    }
}
