//! primeseek - search for expressions that generate the first ten primes
//!
//! Enumerates expressions of increasing size built from constants, the
//! index variable `n`, arithmetic operators and function wrappers, and
//! appends every expression whose values over `n = 0..=iteration_limit`
//! contain 2, 3, 5, ..., 29 to a timestamped result file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use primeseek::settings::AppConfig;
use primeseek::terminal::{escalation_prompt, install_interrupt_handler, BarProgress};
use primeseek_search::{CancelToken, FileSink, LevelRunner, Orchestrator, StopReason};

/// primeseek CLI
#[derive(Parser)]
#[command(name = "primeseek")]
#[command(about = "Search arithmetic expressions for prime-generating formulas", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PRIMESEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Node count of the first level
    #[arg(short, long)]
    node_count: Option<usize>,

    /// Wrap slots per node
    #[arg(long)]
    nesting_level: Option<usize>,

    /// Largest sampled value of n
    #[arg(long)]
    iteration_limit: Option<u32>,

    /// Distance within which values snap to integers
    #[arg(long)]
    precision_tolerance: Option<f64>,

    /// Worker threads, 0 for one per core
    #[arg(short, long)]
    threads: Option<usize>,

    /// Directory for the result file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Result file name after the timestamp
    #[arg(long)]
    output_suffix: Option<String>,

    /// Stop after this node count
    #[arg(long)]
    max_node_count: Option<usize>,

    /// Refuse levels with more candidates than this
    #[arg(long)]
    candidate_limit: Option<u64>,

    /// Start the first level at this candidate ordinal
    #[arg(long, default_value_t = 0)]
    resume_from: u128,

    /// Continue to the next level without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Log level
    #[arg(long, env = "PRIMESEEK_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "PRIMESEEK_LOG_JSON")]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(node_count) = self.node_count {
            config.search.node_count = node_count;
        }
        if let Some(nesting_level) = self.nesting_level {
            config.search.nesting_level = nesting_level;
        }
        if let Some(iteration_limit) = self.iteration_limit {
            config.search.iteration_limit = iteration_limit;
        }
        if let Some(tolerance) = self.precision_tolerance {
            config.search.precision_tolerance = tolerance;
        }
        if let Some(threads) = self.threads {
            config.run.threads = threads;
        }
        if let Some(dir) = &self.output_dir {
            config.run.output_dir = dir.clone();
        }
        if let Some(suffix) = &self.output_suffix {
            config.run.output_suffix = suffix.clone();
        }
        if self.max_node_count.is_some() {
            config.run.max_node_count = self.max_node_count;
        }
        if self.candidate_limit.is_some() {
            config.run.candidate_limit = self.candidate_limit;
        }
        if self.yes {
            config.run.assume_yes = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Load configuration, then let flags win
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let sink = FileSink::timestamped(&config.run.output_dir, &config.run.output_suffix)
        .context("failed to open result file")?;
    info!(path = %sink.path().display(), "writing matches");

    let runner = LevelRunner::new(config.search.clone(), config.run_options())
        .context("failed to start search")?;
    let orchestrator = Orchestrator::new(runner)
        .with_max_node_count(config.run.max_node_count)
        .resuming_from(cli.resume_from);
    info!(
        threads = orchestrator.runner().threads(),
        node_count = orchestrator.runner().config().node_count,
        "starting search"
    );

    let progress = if cli.quiet {
        BarProgress::hidden()
    } else {
        BarProgress::new()
    };
    let mut prompt = escalation_prompt(config.run.assume_yes);

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel).context("failed to install interrupt handler")?;

    let summary = orchestrator
        .run(&sink, &progress, prompt.as_mut(), &cancel)
        .context("search aborted")?;

    for level in &summary.levels {
        println!(
            "{}-node: {} evaluated, {} skipped, {} matched",
            level.node_count, level.evaluated, level.skipped, level.matches
        );
    }
    match &summary.stop {
        StopReason::Overflow(err) => {
            println!("Stopped: {err}. Reduce the node count or nesting level.");
        }
        StopReason::MaxNodeCount => println!("Reached the maximum node count."),
        StopReason::Cancelled => println!("Cancelled."),
        StopReason::Declined => {}
    }
    println!(
        "{} matches written to {}",
        summary.total_matches(),
        sink.path().display()
    );

    Ok(())
}
