//! # unitrack-cli — Command-Line Interface
//!
//! Provides the `unitrack` binary over a JSON snapshot of partner, student,
//! application, and commission records.
//!
//! ## Subcommands
//!
//! - `unitrack calculate`: Commission breakdown for a tier and tuition.
//! - `unitrack estimate`: Net commission preview for a stored partner.
//! - `unitrack enroll`: Mint the commission for an enrolled application.
//! - `unitrack tiers`: Recompute partner tiers or show one partner's tier.
//! - `unitrack commission`: Approve, pay, dispute, resolve, summarize.
//! - `unitrack config`: Validate and print the commission configuration.
//!
//! Argument parsing lives in `main.rs` and the per-subcommand `Args`
//! structs; handlers delegate to `unitrack-commission` and
//! `unitrack-store` and carry no business rules of their own.

pub mod calculate;
pub mod commission;
pub mod config;
pub mod context;
pub mod tiers;

use std::path::PathBuf;

/// Snapshot file used when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "unitrack.json";

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Commission config file; built-in defaults when `None`.
    pub config: Option<PathBuf>,
    /// Snapshot file holding the records.
    pub data: PathBuf,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            config: None,
            data: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}
