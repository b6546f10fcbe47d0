//! # unitrack CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unitrack_cli::calculate::{run_calculate, run_estimate, CalculateArgs, EstimateArgs};
use unitrack_cli::commission::{run_commission, run_enroll, CommissionArgs, EnrollArgs};
use unitrack_cli::config::{run_config, ConfigArgs};
use unitrack_cli::tiers::{run_tiers, TiersArgs};
use unitrack_cli::{GlobalOptions, DEFAULT_DATA_FILE};

/// unitrack: partner commission calculation and tracking.
///
/// Computes commissions through the tier and special-rate cascade, mints
/// commissions for enrolled applications, keeps partner tiers current, and
/// moves commissions through approval, payout, and disputes.
#[derive(Parser, Debug)]
#[command(name = "unitrack", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Commission configuration file (.yaml, .yml or .json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON snapshot holding partners, students, applications and commissions.
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Commission breakdown for a tuition fee and tier.
    Calculate(CalculateArgs),

    /// Net commission preview for a stored partner.
    Estimate(EstimateArgs),

    /// Create the commission for an application that completed enrollment.
    Enroll(EnrollArgs),

    /// Recompute partner tiers or show one partner's tier.
    Tiers(TiersArgs),

    /// Commission lifecycle: approve, pay, dispute, resolve, summarize.
    Commission(CommissionArgs),

    /// Validate or print the commission configuration.
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "unitrack CLI starting");

    let opts = GlobalOptions {
        config: cli.config,
        data: cli.data,
    };
    tracing::debug!(data = %opts.data.display(), config = ?opts.config, "resolved options");

    let result = match cli.command {
        Commands::Calculate(args) => run_calculate(&args, &opts),
        Commands::Estimate(args) => run_estimate(&args, &opts),
        Commands::Enroll(args) => run_enroll(&args, &opts),
        Commands::Tiers(args) => run_tiers(&args, &opts),
        Commands::Commission(args) => run_commission(&args, &opts),
        Commands::Config(args) => run_config(&args, &opts),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
