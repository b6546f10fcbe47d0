//! # Enrollment and Commission Subcommands
//!
//! `enroll` mints the commission for an application that reached
//! enrollment completion. `commission` drives the lifecycle of existing
//! commissions and reports on them. Every mutating command writes the
//! snapshot back.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};

use unitrack_core::{ApplicationId, CommissionId, PartnerId, Timestamp};
use unitrack_state::{Commission, CommissionLifecycleError, CommissionTransitionEvidence};
use unitrack_store::{InMemoryStore, RecordStore};

use crate::context::{open_engine, persist};
use crate::GlobalOptions;

/// Arguments for `unitrack enroll`.
#[derive(Args, Debug)]
pub struct EnrollArgs {
    /// Id of the application that completed enrollment.
    #[arg(long)]
    pub application: String,
    /// Enrollment date (RFC 3339); defaults to now.
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `unitrack commission`.
#[derive(Args, Debug)]
pub struct CommissionArgs {
    #[command(subcommand)]
    pub command: CommissionCommand,
}

/// Commission subcommands.
#[derive(Subcommand, Debug)]
pub enum CommissionCommand {
    /// Approve a pending commission for payout.
    Approve {
        id: String,
        #[arg(long, default_value = "approved")]
        reason: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Record payout of an approved commission.
    Pay {
        id: String,
        #[arg(long, default_value = "paid")]
        reason: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Dispute a pending or approved commission.
    Dispute {
        id: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Resolve a dispute, returning the commission to pending.
    Resolve {
        id: String,
        #[arg(long, default_value = "dispute resolved")]
        reason: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Mark the student's enrollment as verified.
    Verify { id: String },
    /// Mark the student's attendance as confirmed.
    ConfirmAttendance { id: String },
    /// Add a bonus on top of the computed commission.
    Bonus { id: String, amount: f64 },
    /// Show one commission.
    Show { id: String },
    /// List commissions, optionally for one partner.
    List {
        #[arg(long)]
        partner: Option<String>,
    },
    /// Totals by status for one partner.
    Summary {
        #[arg(long)]
        partner: String,
        #[arg(long)]
        json: bool,
    },
}

/// Execute `unitrack enroll`.
pub fn run_enroll(args: &EnrollArgs, opts: &GlobalOptions) -> Result<u8> {
    let enrollment_date = args
        .date
        .as_deref()
        .map(Timestamp::parse_lenient)
        .transpose()
        .context("invalid --date")?;

    let engine = open_engine(opts)?;
    let application_id = ApplicationId::new(args.application.as_str());
    let commission = engine.record_enrollment(&application_id, enrollment_date)?;
    persist(opts, engine.store())?;

    println!(
        "OK: created commission {} for application {}",
        commission.id, commission.application_id
    );
    println!("  Partner: {}", commission.partner_id);
    println!("  Rate: {:.2}%", commission.commission_rate * 100.0);
    println!("  Amount: {:.2} {}", commission.commission_amount, commission.currency);
    Ok(0)
}

/// Execute `unitrack commission`.
pub fn run_commission(args: &CommissionArgs, opts: &GlobalOptions) -> Result<u8> {
    let engine = open_engine(opts)?;
    let store = engine.store();

    match &args.command {
        CommissionCommand::Approve { id, reason, actor } => {
            let ev = evidence(reason, actor);
            transition(opts, store, id, "approved", |c| c.approve(ev))
        }
        CommissionCommand::Pay { id, reason, actor } => {
            let ev = evidence(reason, actor);
            transition(opts, store, id, "paid", |c| c.mark_paid(ev))
        }
        CommissionCommand::Dispute { id, reason, actor } => {
            let ev = evidence(reason, actor);
            transition(opts, store, id, "disputed", |c| c.dispute(ev))
        }
        CommissionCommand::Resolve { id, reason, actor } => {
            let ev = evidence(reason, actor);
            transition(opts, store, id, "resolved", |c| c.resolve_dispute(ev))
        }
        CommissionCommand::Verify { id } => {
            transition(opts, store, id, "enrollment verified", Commission::verify_enrollment)
        }
        CommissionCommand::ConfirmAttendance { id } => {
            transition(opts, store, id, "attendance confirmed", Commission::confirm_attendance)
        }
        CommissionCommand::Bonus { id, amount } => {
            transition(opts, store, id, "bonus added", |c| c.add_bonus(*amount))
        }
        CommissionCommand::Show { id } => {
            let commission = store
                .find_commission(&parse_id(id)?)
                .ok_or_else(|| anyhow!("commission {id} not found"))?;
            println!("{}", serde_json::to_string_pretty(&commission)?);
            Ok(0)
        }
        CommissionCommand::List { partner } => {
            let commissions = match partner {
                Some(p) => store.commissions_for_partner(&PartnerId::new(p.as_str())),
                None => store.commissions(),
            };
            if commissions.is_empty() {
                println!("No commissions found.");
            } else {
                println!("Commissions ({}):", commissions.len());
                for c in &commissions {
                    println!(
                        "  {}: {} {:.2} {} (partner {}, application {})",
                        c.id,
                        c.status,
                        c.total_amount(),
                        c.currency,
                        c.partner_id,
                        c.application_id
                    );
                }
            }
            Ok(0)
        }
        CommissionCommand::Summary { partner, json } => {
            let summary = engine.summarize_partner_commissions(&PartnerId::new(partner.as_str()));
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Partner: {}", summary.partner_id);
                for (label, totals) in [
                    ("Pending", summary.pending),
                    ("Approved", summary.approved),
                    ("Paid", summary.paid),
                    ("Disputed", summary.disputed),
                ] {
                    println!("  {label}: {} ({:.2})", totals.count, totals.amount);
                }
                println!("  Total earned: {:.2}", summary.total_earned);
            }
            Ok(0)
        }
    }
}

fn evidence(reason: &str, actor: &Option<String>) -> CommissionTransitionEvidence {
    let ev = CommissionTransitionEvidence::new(reason);
    match actor {
        Some(a) => ev.by(a.as_str()),
        None => ev,
    }
}

fn parse_id(id: &str) -> Result<CommissionId> {
    id.parse()
        .with_context(|| format!("invalid commission id {id:?}"))
}

/// Apply a lifecycle operation to a stored commission and persist on success.
fn transition(
    opts: &GlobalOptions,
    store: &InMemoryStore,
    id: &str,
    verb: &str,
    op: impl FnOnce(&mut Commission) -> Result<(), CommissionLifecycleError>,
) -> Result<u8> {
    let commission_id = parse_id(id)?;
    store
        .try_update_commission(&commission_id, op)
        .ok_or_else(|| anyhow!("commission {id} not found"))?
        .with_context(|| format!("commission {id} could not be {verb}"))?;
    persist(opts, store)?;

    let status = store
        .find_commission(&commission_id)
        .map(|c| c.status.to_string())
        .unwrap_or_default();
    println!("OK: commission {id} {verb} (status {status})");
    Ok(0)
}
