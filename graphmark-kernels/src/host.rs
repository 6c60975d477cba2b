//! Host Execution Engine
//!
//! [`ExecutionEnvironment`] over a rayon thread pool. Applying a thread
//! count rebuilds the pool; kernels invoked through [`HostEngine::run`]
//! execute inside it, so the harness's thread setting governs the
//! parallelism of every `par_iter` in the kernels. No accelerator is
//! present; accelerator-managed configurations are skipped upstream.

use graphmark_core::{EngineCapacity, EngineError, EngineMode, ExecutionEnvironment};
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

/// Host-processor engine with a reconfigurable thread pool.
pub struct HostEngine {
    capacity: EngineCapacity,
    pool: Option<ThreadPool>,
}

impl HostEngine {
    /// Probe available parallelism and create the engine.
    pub fn new() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1);
        Self {
            capacity: EngineCapacity {
                outer_threads: 1,
                inner_threads: threads,
            },
            pool: None,
        }
    }

    /// Engine with a fixed capacity, for deterministic tests.
    pub fn with_capacity(outer: u32, inner: u32) -> Self {
        Self {
            capacity: EngineCapacity {
                outer_threads: outer,
                inner_threads: inner,
            },
            pool: None,
        }
    }
}

impl Default for HostEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionEnvironment for HostEngine {
    fn capacity(&self) -> EngineCapacity {
        self.capacity
    }

    fn set_threads(&mut self, outer: u32, inner: u32) -> Result<(), EngineError> {
        let threads = (outer * inner).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build()
            .map_err(|e| EngineError::Failed(e.to_string()))?;
        self.pool = Some(pool);
        Ok(())
    }

    fn set_mode(&mut self, mode: EngineMode) -> Result<(), EngineError> {
        match mode {
            EngineMode::Host => Ok(()),
            EngineMode::Accelerator => {
                Err(EngineError::Unsupported("accelerator execution".into()))
            }
        }
    }

    fn run<T, F>(&self, work: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}
