//! Execution Environment Abstraction
//!
//! The underlying sparse engine exposes parallelism and compute-device
//! selection as process-wide settings, not per-call parameters. The
//! harness encapsulates that state behind [`ExecutionEnvironment`] and
//! mutates it only between configurations, under its own strictly
//! serial driver. The trait must not be shared with concurrent callers.

use thiserror::Error;

/// Errors from environment-control calls or kernel invocations
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine does not implement the requested capability.
    #[error("engine does not support {0}")]
    Unsupported(String),

    /// The engine or a kernel running on it reported a failure.
    #[error("engine failure: {0}")]
    Failed(String),
}

/// Where the analytic kernel executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineMode {
    /// Host processor.
    #[default]
    Host,
    /// Accelerator device.
    Accelerator,
}

impl std::fmt::Display for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineMode::Host => write!(f, "CPU"),
            EngineMode::Accelerator => write!(f, "GPU"),
        }
    }
}

/// Maximum usable parallelism, probed once at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCapacity {
    /// Outer-level thread count (e.g. worker teams).
    pub outer_threads: u32,
    /// Inner-level thread count per outer thread.
    pub inner_threads: u32,
}

impl EngineCapacity {
    /// Total usable threads: `outer * inner`.
    pub fn max_threads(&self) -> u32 {
        self.outer_threads * self.inner_threads
    }
}

/// Process-wide mutable engine state: thread count and compute device.
///
/// Settings applied here stay in effect until the next apply call.
/// [`ExecutionEnvironment::run`] executes a closure under the current
/// settings and blocks until it completes.
pub trait ExecutionEnvironment {
    /// Maximum parallelism this engine can use.
    fn capacity(&self) -> EngineCapacity;

    /// Whether an accelerator device is present.
    fn accelerator_available(&self) -> bool {
        false
    }

    /// Thread count the engine chooses when a configuration delegates
    /// scheduling to the accelerator.
    fn accelerator_threads(&self) -> u32 {
        self.capacity().max_threads()
    }

    /// Set the engine's outer and inner thread counts.
    fn set_threads(&mut self, outer: u32, inner: u32) -> Result<(), EngineError>;

    /// Select the compute device for subsequent kernel invocations.
    fn set_mode(&mut self, mode: EngineMode) -> Result<(), EngineError>;

    /// Run `work` synchronously under the current settings.
    ///
    /// `Send` because engines may hand the work to their own pool.
    fn run<T, F>(&self, work: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_product() {
        let cap = EngineCapacity {
            outer_threads: 2,
            inner_threads: 8,
        };
        assert_eq!(cap.max_threads(), 16);
    }

    #[test]
    fn mode_display() {
        assert_eq!(EngineMode::Host.to_string(), "CPU");
        assert_eq!(EngineMode::Accelerator.to_string(), "GPU");
    }
}
