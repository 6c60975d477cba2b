//! Benchmark Session
//!
//! The top-level driver: probe capacity, build the schedule, compute
//! the trusted reference, warm up and validate the candidate once, then
//! sweep every configuration and report the winner. Runs entirely on
//! one thread; the only parallelism is inside the engine, behind the
//! synchronous kernel calls.

use crate::executor::{Executor, HarnessError};
use crate::oracle::{validate, Verdict};
use crate::report::Reporter;
use crate::schedule::resolve_schedule;
use crate::selector::{BestResult, BestSelector};
use crate::sweep::build_sweep;
use graphmark_core::{Clock, EngineError, EngineMode, ExecutionEnvironment, KernelOutput, Timer};
use std::io::Write;

/// Tunable knobs of one benchmark session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Timed trials per configuration.
    pub trials: usize,
    /// Absolute-error tolerance for the single warmup validation.
    pub tolerance: f64,
    /// Whether a validation mismatch aborts the session.
    pub strict_validation: bool,
    /// Cap on the auto-generated thread schedule.
    pub max_schedule_len: usize,
    /// Explicit thread list; empty means auto-halving.
    pub explicit_threads: Vec<u32>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            trials: 3,
            tolerance: crate::oracle::DEFAULT_TOLERANCE,
            strict_validation: false,
            max_schedule_len: crate::schedule::DEFAULT_MAX_SCHEDULE_LEN,
            explicit_threads: Vec::new(),
        }
    }
}

/// Identity of the graph under test, for reporting only.
#[derive(Debug, Clone)]
pub struct GraphStats {
    /// Display name (file name or "stdin").
    pub name: String,
    /// Vertex count.
    pub node_count: usize,
    /// Stored adjacency entries; feeds throughput figures.
    pub entry_count: usize,
}

/// Run a complete sweep-and-validate session.
///
/// `reference_fn` must be an independent implementation of the same
/// computation as `kernel_fn`; its output is the session's ground
/// truth. `kernel_fn` is invoked once for the warmup validation and
/// then `options.trials` times per surviving configuration.
///
/// Returns the best configuration, or `None` when every configuration
/// was skipped. Engine errors and, under strict validation, mismatches
/// are fatal and abort the remaining sweep.
#[allow(clippy::too_many_arguments)]
pub fn run_session<E, C, P, D, V, S, RF, KF>(
    env: &mut E,
    clock: &C,
    reporter: &mut Reporter<P, D>,
    options: &SessionOptions,
    graph: &GraphStats,
    variants: &[V],
    sorts: &[S],
    reference_fn: &mut RF,
    kernel_fn: &mut KF,
) -> Result<Option<BestResult<V, S>>, HarnessError>
where
    E: ExecutionEnvironment,
    C: Clock,
    P: Write,
    D: Write,
    V: Clone + std::fmt::Display + Sync,
    S: Clone + std::fmt::Display + Sync,
    RF: FnMut() -> Result<KernelOutput, EngineError>,
    KF: FnMut(&V, &S) -> Result<KernelOutput, EngineError> + Send,
{
    reporter.session_header(&graph.name, graph.node_count, graph.entry_count, options.trials)?;

    let capacity = env.capacity();
    let schedule = resolve_schedule(&options.explicit_threads, capacity, options.max_schedule_len);
    reporter.threads_to_test(&schedule)?;

    // ground truth, computed once before any timed trial
    let timer = Timer::start(clock);
    let reference = reference_fn()?;
    reporter.reference_line(&reference.to_string(), timer.stop())?;

    // warmup the candidate and validate it exactly once
    if let (Some(variant), Some(sort)) = (variants.first(), sorts.first()) {
        env.set_threads(1, capacity.max_threads())?;
        env.set_mode(EngineMode::Host)?;

        let timer = Timer::start(clock);
        let candidate = env.run(|| kernel_fn(variant, sort))?;
        reporter.warmup_line(&format!("{} {}", variant, sort), timer.stop())?;

        check(reporter, &reference, &candidate, options)?;

        if env.accelerator_available() {
            env.set_mode(EngineMode::Accelerator)?;
            let timer = Timer::start(clock);
            let candidate = env.run(|| kernel_fn(variant, sort))?;
            reporter.warmup_line(&format!("{} {} (accelerator)", variant, sort), timer.stop())?;
            check(reporter, &reference, &candidate, options)?;
            env.set_mode(EngineMode::Host)?;
        }
    }

    // the sweep proper
    let sweep = build_sweep(variants, sorts, &schedule);
    let executor = Executor::new(clock, options.trials, graph.entry_count);
    let mut selector = BestSelector::new();

    for config in &sweep {
        if let Some(run) = executor.run_configuration(env, reporter, config, kernel_fn)? {
            selector.consider(&run);
        }
    }

    reporter.best_line(selector.best(), graph.entry_count)?;
    Ok(selector.into_best())
}

/// Apply the oracle's verdict under the session's mismatch policy.
fn check<P: Write, D: Write>(
    reporter: &mut Reporter<P, D>,
    reference: &KernelOutput,
    candidate: &KernelOutput,
    options: &SessionOptions,
) -> Result<(), HarnessError> {
    match validate(reference, candidate, options.tolerance) {
        Verdict::Pass => Ok(()),
        Verdict::Fail { max_abs_error } => {
            reporter.mismatch(max_abs_error, options.tolerance)?;
            if options.strict_validation {
                Err(HarnessError::Mismatch {
                    max_abs_error,
                    tolerance: options.tolerance,
                })
            } else {
                Ok(())
            }
        }
    }
}
