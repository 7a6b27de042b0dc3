//! hic-anchors CLI entry point
//!
//! Merges and widens Hi-C anchor lists.

use clap::{Parser, Subcommand, ValueEnum};
use hic_anchors::bed::RecordPolicy;
use hic_anchors::pipeline::{merge_anchor_list, widen_anchor_list, PipelineOptions, PipelineStats};
use hic_anchors::ClusterConfig;
use std::path::PathBuf;
use std::time::Instant;

/// How invalid records are handled (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PolicyArg {
    /// Skip invalid records and report how many were dropped
    #[default]
    #[value(name = "skip")]
    Skip,
    /// Stop at the first invalid record
    #[value(name = "abort")]
    Abort,
}

impl From<PolicyArg> for RecordPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => RecordPolicy::Skip,
            PolicyArg::Abort => RecordPolicy::Abort,
        }
    }
}

#[derive(Parser)]
#[command(name = "hic-anchors")]
#[command(about = "Normalize, merge and widen Hi-C anchor lists")]
#[command(version)]
struct Cli {
    /// Invalid record handling: 'skip' or 'abort'
    #[arg(long = "on-invalid", global = true, default_value = "skip")]
    on_invalid: PolicyArg,

    /// Number of threads (default: 1)
    #[arg(short = 't', long, global = true, default_value = "1")]
    threads: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping anchors into a canonical list
    Merge {
        /// Input anchor list (chrom, start, end; may be gzip/bzip2 compressed)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Largest gap between anchors that still merges them
        #[arg(long, default_value = "0")]
        tolerance: u64,
        /// Widen merged anchors by this total width
        #[arg(long, allow_negative_numbers = true)]
        widen: Option<i64>,
        /// Merge again after widening so windows do not overlap
        #[arg(long)]
        canonical: bool,
    },
    /// Widen every anchor into a search window
    Widen {
        /// Input anchor list (chrom, start, end; may be gzip/bzip2 compressed)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Total width added to each anchor (half on each side)
        #[arg(short = 'w', long, allow_negative_numbers = true)]
        width: i64,
        /// Merge overlapping windows
        #[arg(long)]
        canonical: bool,
        /// Largest gap between windows that still merges them
        #[arg(long, default_value = "0")]
        tolerance: u64,
    },
}

fn print_stats(stats: &PipelineStats, start: Instant) {
    eprintln!("\n=== Anchor Statistics ===");
    eprintln!("Total records:   {}", stats.records);
    eprintln!("Skipped:         {}", stats.skipped);
    eprintln!("Anchors written: {}", stats.written);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let threads = cli.threads.max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {}", e))?;

    let policy: RecordPolicy = cli.on_invalid.into();

    match cli.command {
        Commands::Merge { input, output, tolerance, widen, canonical } => {
            let options = PipelineOptions {
                policy,
                cluster: ClusterConfig::default()
                    .with_tolerance(tolerance)
                    .with_parallel(threads > 1),
                canonical,
            };

            eprintln!("Merging anchors: {:?}", input);
            let stats = merge_anchor_list(&input, output.as_deref(), widen, &options)?;
            print_stats(&stats, start);
        }

        Commands::Widen { input, output, width, canonical, tolerance } => {
            let options = PipelineOptions {
                policy,
                cluster: ClusterConfig::default()
                    .with_tolerance(tolerance)
                    .with_parallel(threads > 1),
                canonical,
            };

            eprintln!("Widening anchors by {}: {:?}", width, input);
            let stats = widen_anchor_list(&input, output.as_deref(), width, &options)?;
            print_stats(&stats, start);
        }
    }

    Ok(())
}
