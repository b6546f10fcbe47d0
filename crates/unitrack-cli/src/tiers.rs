//! # Tier Subcommands
//!
//! `tiers update` recomputes every partner's tier from its qualifying
//! applications and writes back the ones that moved. `tiers show` reports
//! one partner's stored and computed tier without writing.

use anyhow::Result;
use clap::{Args, Subcommand};

use unitrack_commission::count_qualifying_applications;
use unitrack_core::PartnerId;
use unitrack_store::RecordStore;

use crate::context::{open_engine, persist};
use crate::GlobalOptions;

/// Arguments for `unitrack tiers`.
#[derive(Args, Debug)]
pub struct TiersArgs {
    #[command(subcommand)]
    pub command: TiersCommand,
}

/// Tier subcommands.
#[derive(Subcommand, Debug)]
pub enum TiersCommand {
    /// Recompute and save every partner's tier.
    Update {
        /// Report changes without writing the snapshot.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show one partner's stored and computed tier.
    Show {
        #[arg(long)]
        partner: String,
    },
}

/// Execute `unitrack tiers`.
pub fn run_tiers(args: &TiersArgs, opts: &GlobalOptions) -> Result<u8> {
    let engine = open_engine(opts)?;

    match &args.command {
        TiersCommand::Update { dry_run } => {
            let changes = engine.update_partner_tiers();
            if changes.is_empty() {
                println!("All partner tiers are current.");
                return Ok(0);
            }
            for change in &changes {
                let previous = change
                    .previous
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "unset".to_string());
                println!("  {}: {previous} -> {}", change.partner_id, change.current);
            }
            if *dry_run {
                println!("{} partner(s) would change (dry run, nothing written).", changes.len());
            } else {
                persist(opts, engine.store())?;
                println!("OK: updated {} partner tier(s).", changes.len());
            }
            Ok(0)
        }
        TiersCommand::Show { partner } => {
            let partner_id = PartnerId::new(partner.as_str());
            let stored = engine.store().find_partner(&partner_id);
            if stored.is_none() {
                tracing::warn!(partner = %partner_id, "partner not in snapshot");
            }
            let applications = engine.store().applications();
            let qualifying = count_qualifying_applications(&applications, &partner_id);
            let computed = engine.calculate_partner_tier(&partner_id);

            println!("Partner: {partner_id}");
            match stored.and_then(|p| p.tier) {
                Some(tier) => println!("  Stored tier: {tier}"),
                None => println!("  Stored tier: unset"),
            }
            println!("  Qualifying applications: {qualifying}");
            println!("  Computed tier: {computed}");
            Ok(0)
        }
    }
}
