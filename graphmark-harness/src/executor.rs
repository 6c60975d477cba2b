//! Benchmark Executor
//!
//! Applies one configuration to the shared execution environment, runs
//! the requested number of timed trials, and aggregates them into a
//! [`SweepRun`]. The harness drives configurations strictly one after
//! another; the environment's thread count and engine mode are mutated
//! only here, between configurations, never during a timed trial.
//!
//! Failure policy is all-or-nothing: any engine or kernel error aborts
//! the remaining sweep immediately.

use crate::report::Reporter;
use crate::schedule::ThreadSlot;
use crate::sweep::Configuration;
use graphmark_core::{
    checked_capacity, AllocError, Clock, EngineError, ExecutionEnvironment, KernelOutput, Timer,
};
use std::io::Write;
use thiserror::Error;

/// Fatal and diagnostic errors of the sweep harness
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Allocation overflow or exhaustion. Fatal.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// Engine or kernel failure. Fatal, aborts the remaining sweep.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Candidate diverged from the reference beyond tolerance. Raised
    /// only under strict validation; otherwise reported and tolerated.
    #[error("validation mismatch: max absolute error {max_abs_error:.3e} exceeds tolerance {tolerance:.3e}")]
    Mismatch {
        /// Largest observed element-wise error.
        max_abs_error: f64,
        /// Tolerance in force.
        tolerance: f64,
    },

    /// A report sink rejected a write.
    #[error("report sink error: {0}")]
    Io(#[from] std::io::Error),
}

/// One timed trial, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialMeasurement {
    /// Zero-based trial index within its configuration.
    pub trial: usize,
    /// Wall-clock seconds the candidate took.
    pub seconds: f64,
}

/// All trials of one configuration, aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRun<V, S> {
    /// The configuration that was applied.
    pub configuration: Configuration<V, S>,
    /// Thread count actually used (resolved for accelerator slots).
    pub threads: u32,
    /// Individual trial timings.
    pub trials: Vec<TrialMeasurement>,
    /// Mean of the trial timings.
    pub average_seconds: f64,
}

/// Runs trials for one configuration at a time.
pub struct Executor<'c, C: Clock> {
    clock: &'c C,
    trials: usize,
    entry_count: usize,
}

impl<'c, C: Clock> Executor<'c, C> {
    /// Executor timing `trials` runs per configuration against `clock`.
    /// `entry_count` feeds the throughput figures in the report.
    pub fn new(clock: &'c C, trials: usize, entry_count: usize) -> Self {
        Self {
            clock,
            trials: trials.max(1),
            entry_count,
        }
    }

    /// Run all trials for `config`.
    ///
    /// Returns `Ok(None)` when the configuration is skipped: a fixed
    /// thread count above the engine capacity, or an
    /// accelerator-managed slot with no accelerator present. Skipped
    /// entries stay in the schedule; they are simply not executed.
    pub fn run_configuration<E, P, D, V, S, K>(
        &self,
        env: &mut E,
        reporter: &mut Reporter<P, D>,
        config: &Configuration<V, S>,
        kernel: &mut K,
    ) -> Result<Option<SweepRun<V, S>>, HarnessError>
    where
        E: ExecutionEnvironment,
        P: Write,
        D: Write,
        V: Clone + std::fmt::Display + Sync,
        S: Clone + std::fmt::Display + Sync,
        K: FnMut(&V, &S) -> Result<KernelOutput, EngineError> + Send,
    {
        let threads = match config.threads {
            ThreadSlot::Fixed(n) => {
                if n > env.capacity().max_threads() {
                    return Ok(None);
                }
                n
            }
            ThreadSlot::AcceleratorManaged => {
                if !env.accelerator_available() {
                    return Ok(None);
                }
                env.accelerator_threads()
            }
        };

        // configure before any timing; stays in effect until the next
        // configuration is applied
        env.set_threads(1, threads)?;
        env.set_mode(config.mode)?;

        let mut trials = Vec::with_capacity(checked_capacity::<TrialMeasurement>(
            self.trials as u64,
        )?);
        let mut total = 0.0;

        for trial in 0..self.trials {
            let timer = Timer::start(self.clock);
            let candidate = env.run(|| kernel(&config.variant, &config.sort))?;
            let seconds = timer.stop();
            drop(candidate);

            reporter.trial_line(threads, trial, seconds, self.entry_count)?;
            trials.push(TrialMeasurement { trial, seconds });
            total += seconds;
        }

        let average_seconds = total / self.trials as f64;
        reporter.config_summary(&config.to_string(), threads, average_seconds, self.entry_count)?;

        Ok(Some(SweepRun {
            configuration: config.clone(),
            threads,
            trials,
            average_seconds,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeEnvironment, ScriptedClock};
    use graphmark_core::EngineMode;

    fn config(threads: ThreadSlot) -> Configuration<&'static str, &'static str> {
        let mode = match threads {
            ThreadSlot::Fixed(_) => EngineMode::Host,
            ThreadSlot::AcceleratorManaged => EngineMode::Accelerator,
        };
        Configuration {
            threads,
            mode,
            variant: "tc",
            sort: "none",
        }
    }

    fn quiet() -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(Vec::new(), Vec::new())
    }

    #[test]
    fn averages_scripted_trials() {
        let clock = ScriptedClock::with_durations(&[0.10, 0.12, 0.09, 0.11]);
        let mut env = FakeEnvironment::new(16, false);
        let executor = Executor::new(&clock, 4, 1000);
        let mut reporter = quiet();

        let run = executor
            .run_configuration(&mut env, &mut reporter, &config(ThreadSlot::Fixed(8)), &mut |_,
             _| {
                Ok(KernelOutput::Scalar(1.0))
            })
            .unwrap()
            .unwrap();

        assert_eq!(run.threads, 8);
        assert_eq!(run.trials.len(), 4);
        assert!((run.average_seconds - 0.105).abs() < 1e-12);
        assert!((run.trials[1].seconds - 0.12).abs() < 1e-12);
    }

    #[test]
    fn skips_oversized_thread_counts() {
        let clock = ScriptedClock::with_durations(&[0.1]);
        let mut env = FakeEnvironment::new(4, false);
        let executor = Executor::new(&clock, 1, 10);
        let mut reporter = quiet();

        let run = executor
            .run_configuration(&mut env, &mut reporter, &config(ThreadSlot::Fixed(64)), &mut |_,
             _| {
                Ok(KernelOutput::Scalar(1.0))
            })
            .unwrap();
        assert!(run.is_none());
        assert!(env.applied_threads.is_empty());
    }

    #[test]
    fn skips_accelerator_slot_without_accelerator() {
        let clock = ScriptedClock::with_durations(&[0.1]);
        let mut env = FakeEnvironment::new(4, false);
        let executor = Executor::new(&clock, 1, 10);
        let mut reporter = quiet();

        let run = executor
            .run_configuration(
                &mut env,
                &mut reporter,
                &config(ThreadSlot::AcceleratorManaged),
                &mut |_, _| Ok(KernelOutput::Scalar(1.0)),
            )
            .unwrap();
        assert!(run.is_none());
    }

    #[test]
    fn accelerator_slot_uses_engine_chosen_count() {
        let clock = ScriptedClock::with_durations(&[0.2]);
        let mut env = FakeEnvironment::new(16, true);
        let executor = Executor::new(&clock, 1, 10);
        let mut reporter = quiet();

        let run = executor
            .run_configuration(
                &mut env,
                &mut reporter,
                &config(ThreadSlot::AcceleratorManaged),
                &mut |_, _| Ok(KernelOutput::Scalar(1.0)),
            )
            .unwrap()
            .unwrap();
        assert_eq!(run.threads, 40);
        assert_eq!(env.applied_modes, vec![EngineMode::Accelerator]);
    }

    #[test]
    fn kernel_error_is_fatal() {
        let clock = ScriptedClock::with_durations(&[0.1, 0.1]);
        let mut env = FakeEnvironment::new(4, false);
        let executor = Executor::new(&clock, 2, 10);
        let mut reporter = quiet();

        let result = executor.run_configuration(
            &mut env,
            &mut reporter,
            &config(ThreadSlot::Fixed(2)),
            &mut |_, _| Err(EngineError::Failed("kernel blew up".into())),
        );
        assert!(matches!(result, Err(HarnessError::Engine(_))));
    }
}
