//! # Satin Compute
//!
//! Execution backend abstraction for the Satin sweep engine. This crate
//! provides a [`ComputeBackend`](backend::ComputeBackend) trait that isolates
//! the beam physics from how independent sweep points are scheduled.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Status |
//! |---------|-------------|--------|
//! | Serial | always | Implemented |
//! | CPU (Rayon) | `cpu` (default) | Implemented |

pub mod backend;
pub mod serial;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use backend::{backend_for, BackendType, ComputeBackend, ComputeError, DeviceInfo};
pub use serial::SerialBackend;

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
