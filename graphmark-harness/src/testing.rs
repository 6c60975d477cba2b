//! Scripted Fakes
//!
//! Deterministic stand-ins for the clock and the execution environment,
//! used by the harness's own tests and by downstream integration tests.

use graphmark_core::{Clock, EngineCapacity, EngineError, EngineMode, ExecutionEnvironment};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Clock replaying a fixed timestamp script.
pub struct ScriptedClock {
    times: RefCell<VecDeque<f64>>,
}

impl ScriptedClock {
    /// Clock whose consecutive start/stop pairs observe exactly the
    /// given durations, in order.
    pub fn with_durations(durations: &[f64]) -> Self {
        let mut times = VecDeque::with_capacity(durations.len() * 2);
        let mut t = 0.0;
        for &d in durations {
            times.push_back(t);
            t += d;
            times.push_back(t);
        }
        Self {
            times: RefCell::new(times),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> f64 {
        self.times
            .borrow_mut()
            .pop_front()
            .expect("scripted clock exhausted")
    }
}

/// Environment that records every apply call and runs work inline.
pub struct FakeEnvironment {
    capacity: EngineCapacity,
    accelerator: bool,
    /// Every `(outer, inner)` pair passed to `set_threads`.
    pub applied_threads: Vec<(u32, u32)>,
    /// Every mode passed to `set_mode`.
    pub applied_modes: Vec<EngineMode>,
}

impl FakeEnvironment {
    /// Environment with `max_threads` capacity and optional accelerator.
    pub fn new(max_threads: u32, accelerator: bool) -> Self {
        Self {
            capacity: EngineCapacity {
                outer_threads: 1,
                inner_threads: max_threads,
            },
            accelerator,
            applied_threads: Vec::new(),
            applied_modes: Vec::new(),
        }
    }
}

impl ExecutionEnvironment for FakeEnvironment {
    fn capacity(&self) -> EngineCapacity {
        self.capacity
    }

    fn accelerator_available(&self) -> bool {
        self.accelerator
    }

    fn accelerator_threads(&self) -> u32 {
        40
    }

    fn set_threads(&mut self, outer: u32, inner: u32) -> Result<(), EngineError> {
        self.applied_threads.push((outer, inner));
        Ok(())
    }

    fn set_mode(&mut self, mode: EngineMode) -> Result<(), EngineError> {
        self.applied_modes.push(mode);
        Ok(())
    }

    fn run<T, F>(&self, work: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        work()
    }
}
