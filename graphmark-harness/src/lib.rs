#![warn(missing_docs)]
//! Graphmark Harness - Sweep-and-Validate Benchmark Executor
//!
//! Drives a candidate graph-analytics kernel across combinations of
//! thread counts, compute device, algorithmic variants, and
//! pre-sorting policies; validates the candidate once against an
//! independent reference; aggregates repeated trial timings; and
//! selects the best-performing configuration.
//!
//! Control flow is strictly serial: configurations and trials never
//! overlap, so the engine's process-wide thread/mode settings are safe
//! to mutate between runs.

mod config;
mod executor;
mod oracle;
mod report;
mod schedule;
mod selector;
mod session;
mod sweep;
pub mod testing;

pub use config::{ConfigError, HarnessConfig, SweepConfig, ValidateConfig};
pub use executor::{Executor, HarnessError, SweepRun, TrialMeasurement};
pub use oracle::{validate, Verdict, DEFAULT_TOLERANCE};
pub use report::{rate, Reporter};
pub use schedule::{halving_schedule, resolve_schedule, ThreadSlot, DEFAULT_MAX_SCHEDULE_LEN};
pub use selector::{BestResult, BestSelector};
pub use session::{run_session, GraphStats, SessionOptions};
pub use sweep::{build_sweep, Configuration};
