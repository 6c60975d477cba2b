//! Two-Sink Reporting
//!
//! Progress and summary lines go to two independent sinks: the primary
//! output and a diagnostic stream, so a crashed or redirected run still
//! leaves a durable trace. Formatting follows the original benchmark
//! logs: fixed-width thread counts, six-decimal seconds, throughput in
//! millions of entries per second.

use crate::schedule::ThreadSlot;
use crate::selector::BestResult;
use chrono::Local;
use std::io::{self, Write};

/// Throughput in millions of adjacency entries per second.
pub fn rate(entry_count: usize, seconds: f64) -> f64 {
    1e-6 * entry_count as f64 / seconds
}

/// Writer pair receiving every report line.
pub struct Reporter<P: Write, D: Write> {
    primary: P,
    diagnostic: D,
}

impl Reporter<io::Stdout, io::Stderr> {
    /// Reporter over stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<P: Write, D: Write> Reporter<P, D> {
    /// Reporter over arbitrary sinks.
    pub fn new(primary: P, diagnostic: D) -> Self {
        Self { primary, diagnostic }
    }

    fn both(&mut self, line: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.primary.write_fmt(line)?;
        self.primary.write_all(b"\n")?;
        self.diagnostic.write_fmt(line)?;
        self.diagnostic.write_all(b"\n")?;
        self.diagnostic.flush()
    }

    /// Session banner: input identity and trial count.
    pub fn session_header(
        &mut self,
        matrix_name: &str,
        node_count: usize,
        entry_count: usize,
        trials: usize,
    ) -> io::Result<()> {
        self.both(format_args!(
            "graphmark {} - matrix: {} nodes: {} entries: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            matrix_name,
            node_count,
            entry_count
        ))?;
        self.both(format_args!("# of trials: {}", trials))
    }

    /// The thread counts the sweep will try.
    pub fn threads_to_test(&mut self, schedule: &[ThreadSlot]) -> io::Result<()> {
        let slots: Vec<String> = schedule.iter().map(|s| s.to_string()).collect();
        self.both(format_args!("threads to test: {}", slots.join(" ")))
    }

    /// Timing of the trusted reference computation.
    pub fn reference_line(&mut self, label: &str, seconds: f64) -> io::Result<()> {
        self.both(format_args!(
            "reference ({}) time: {:.6} sec",
            label, seconds
        ))
    }

    /// Timing of the warmup run.
    pub fn warmup_line(&mut self, label: &str, seconds: f64) -> io::Result<()> {
        self.both(format_args!("warmup {}: {:.6} sec", label, seconds))
    }

    /// Non-fatal validation failure diagnostic.
    pub fn mismatch(&mut self, max_abs_error: f64, tolerance: f64) -> io::Result<()> {
        self.both(format_args!(
            "Test failure! max abs error {:.3e} (tolerance {:.3e})",
            max_abs_error, tolerance
        ))
    }

    /// One timed trial.
    pub fn trial_line(
        &mut self,
        threads: u32,
        trial: usize,
        seconds: f64,
        entry_count: usize,
    ) -> io::Result<()> {
        self.both(format_args!(
            "threads {:3} trial {:2}: {:12.6} sec rate {:6.2}",
            threads,
            trial,
            seconds,
            rate(entry_count, seconds)
        ))
    }

    /// Per-configuration average.
    pub fn config_summary(
        &mut self,
        label: &str,
        threads: u32,
        average_seconds: f64,
        entry_count: usize,
    ) -> io::Result<()> {
        self.both(format_args!(
            "Avg: {} nthreads: {:3} time: {:12.6} rate: {:6.2}",
            label,
            threads,
            average_seconds,
            rate(entry_count, average_seconds)
        ))
    }

    /// Final summary: the winning configuration, or the absence of one.
    pub fn best_line<V: std::fmt::Display, S: std::fmt::Display>(
        &mut self,
        best: Option<&BestResult<V, S>>,
        entry_count: usize,
    ) -> io::Result<()> {
        match best {
            Some(best) => self.both(format_args!(
                "Best method: {} nthreads: {:3} time: {:12.6} rate: {:6.2}",
                best.configuration,
                best.threads,
                best.average_seconds,
                rate(entry_count, best.average_seconds)
            )),
            None => self.both(format_args!("no configuration evaluated")),
        }
    }
}
