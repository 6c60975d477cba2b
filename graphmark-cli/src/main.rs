//! Graphmark Binary
//!
//! Loads a Matrix Market graph, runs a sweep-and-validate benchmark
//! session for the selected kernel (triangle counting by default,
//! clustering coefficients with `--lcc`), and prints the report to
//! stdout with a diagnostic copy on stderr. Configuration comes from a
//! discovered `graphmark.toml`, overridden by command-line flags.

use anyhow::{bail, Context, Result};
use clap::Parser;
use graphmark_core::{pin_to_cpu, KernelOutput, MonotonicClock};
use graphmark_harness::{run_session, GraphStats, HarnessConfig, Reporter, SessionOptions};
use graphmark_kernels::{
    apply_sort_policy, clustering_coefficients, clustering_coefficients_simple, count_triangles,
    count_triangles_simple, load_graph, CsrGraph, HostEngine, SortPolicy, TriangleVariant,
};
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "graphmark")]
#[command(author, version, about = "Sweep-and-validate benchmarks for graph analytics kernels")]
struct Cli {
    /// Graph file in Matrix Market coordinate format
    graph: PathBuf,

    /// Benchmark clustering coefficients instead of triangle counting
    #[arg(long)]
    lcc: bool,

    /// Filter triangle variants by regex pattern
    #[arg(long, default_value = ".*")]
    filter: String,

    /// Timed trials per configuration
    #[arg(long)]
    trials: Option<usize>,

    /// Thread counts to sweep (comma separated; a leading 0 selects
    /// the automatic halving schedule)
    #[arg(long, value_delimiter = ',')]
    threads: Option<Vec<u32>>,

    /// Absolute-error tolerance for the warmup validation
    #[arg(long)]
    tolerance: Option<f64>,

    /// Treat a validation mismatch as fatal
    #[arg(long)]
    strict: bool,

    /// Sort policies to sweep: none, ascending, descending, auto
    #[arg(long, value_delimiter = ',')]
    sort: Option<Vec<String>>,

    /// Pin the driver to a CPU for timing stability
    #[arg(long)]
    pin: Option<usize>,

    /// Configuration file to use instead of discovery
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HarnessConfig::discover().unwrap_or_default(),
    };

    let mut options = config.session_options();
    if let Some(trials) = cli.trials {
        options.trials = trials;
    }
    if let Some(tolerance) = cli.tolerance {
        options.tolerance = tolerance;
    }
    if cli.strict {
        options.strict_validation = true;
    }
    if let Some(threads) = &cli.threads {
        options.explicit_threads = threads.clone();
    }

    if let Some(cpu) = cli.pin {
        pin_to_cpu(cpu).with_context(|| format!("pinning to cpu {}", cpu))?;
    }

    let graph = load_graph(&cli.graph)
        .with_context(|| format!("loading graph {}", cli.graph.display()))?;
    let stats = GraphStats {
        name: cli.graph.display().to_string(),
        node_count: graph.node_count(),
        entry_count: graph.entry_count(),
    };

    let mut env = HostEngine::new();
    let clock = MonotonicClock::new();
    let mut reporter = Reporter::stdio();

    if cli.lcc {
        run_lcc(&mut env, &clock, &mut reporter, &options, &stats, &graph)
    } else {
        let variants = select_variants(&cli, &config)?;
        let sorts = select_sorts(&cli, &config)?;
        run_triangles(
            &mut env,
            &clock,
            &mut reporter,
            &options,
            &stats,
            &graph,
            &variants,
            &sorts,
        )
    }
}

/// Triangle variants to sweep: the configured subset (or all four),
/// narrowed by the `--filter` regex.
fn select_variants(cli: &Cli, config: &HarnessConfig) -> Result<Vec<TriangleVariant>> {
    let mut variants: Vec<TriangleVariant> = if config.sweep.variants.is_empty() {
        TriangleVariant::ALL.to_vec()
    } else {
        config
            .sweep
            .variants
            .iter()
            .map(|name| name.parse().map_err(anyhow::Error::msg))
            .collect::<Result<_>>()?
    };

    let filter = Regex::new(&cli.filter).context("invalid --filter regex")?;
    variants.retain(|v| filter.is_match(&v.to_string()));
    if variants.is_empty() {
        bail!("no triangle variant matches filter {:?}", cli.filter);
    }
    Ok(variants)
}

fn select_sorts(cli: &Cli, config: &HarnessConfig) -> Result<Vec<SortPolicy>> {
    let names = match &cli.sort {
        Some(names) => names.clone(),
        None => config.sweep.sort_policies.clone(),
    };
    if names.is_empty() {
        return Ok(vec![SortPolicy::NoSort]);
    }
    names
        .iter()
        .map(|name| name.parse().map_err(anyhow::Error::msg))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn run_triangles(
    env: &mut HostEngine,
    clock: &MonotonicClock,
    reporter: &mut Reporter<std::io::Stdout, std::io::Stderr>,
    options: &SessionOptions,
    stats: &GraphStats,
    graph: &CsrGraph,
    variants: &[TriangleVariant],
    sorts: &[SortPolicy],
) -> Result<()> {
    let mut reference = || Ok(KernelOutput::Scalar(count_triangles_simple(graph) as f64));
    let mut kernel = |variant: &TriangleVariant, sort: &SortPolicy| {
        let view = apply_sort_policy(graph, *sort);
        Ok(KernelOutput::Scalar(count_triangles(&view, *variant) as f64))
    };

    run_session(
        env,
        clock,
        reporter,
        options,
        stats,
        variants,
        sorts,
        &mut reference,
        &mut kernel,
    )
    .context("benchmark session failed")?;
    Ok(())
}

/// Clustering coefficients are per-vertex, so degree relabeling would
/// permute the output against the reference; the sweep runs unsorted.
fn run_lcc(
    env: &mut HostEngine,
    clock: &MonotonicClock,
    reporter: &mut Reporter<std::io::Stdout, std::io::Stderr>,
    options: &SessionOptions,
    stats: &GraphStats,
    graph: &CsrGraph,
) -> Result<()> {
    let mut reference =
        || Ok(KernelOutput::PerVertex(clustering_coefficients_simple(graph)));
    let mut kernel = |_variant: &&str, _sort: &SortPolicy| {
        Ok(KernelOutput::PerVertex(clustering_coefficients(graph)))
    };

    run_session(
        env,
        clock,
        reporter,
        options,
        stats,
        &["lcc"],
        &[SortPolicy::NoSort],
        &mut reference,
        &mut kernel,
    )
    .context("benchmark session failed")?;
    Ok(())
}
