//! # unitrack-commission — Commission Engine
//!
//! Computes what a partner earns for a student's enrollment.
//!
//! ## Rate cascade
//!
//! 1. Tier base rate.
//! 2. University override replaces the rate.
//! 3. Otherwise a program override replaces the rate.
//! 4. A nationality bonus is added on top of whichever rate stands.
//!
//! Gross commission is tuition × effective rate; the processing fee and tax
//! are fractions of gross; net is what remains. Every adjustment is recorded,
//! in order, in the result's `breakdown`.
//!
//! ## Modules
//!
//! - `config.rs`: [`CommissionConfig`], its built-in defaults, file loading,
//!   and validation.
//! - `calculation.rs`: [`calculate_commission`], a pure function of its
//!   arguments.
//! - `tier.rs`: the enrollment-count tier ladder.
//! - `engine.rs`: [`CommissionEngine`], which reads records from a
//!   [`RecordStore`](unitrack_store::RecordStore) to mint commissions,
//!   recompute partner tiers, and produce estimates.
//! - `summary.rs`: per-partner commission totals for dashboards.
//!
//! Configuration is an explicit value handed to every computation; there is
//! no process-wide mutable table.

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod summary;
pub mod tier;

pub use calculation::{calculate_commission, CommissionCalculation, CommissionInputs};
pub use config::{CommissionConfig, SpecialRates, TierRule};
pub use engine::{CommissionEngine, CommissionEstimate, TierChange};
pub use error::{ConfigError, EngineError};
pub use summary::{PartnerCommissionSummary, StatusTotals};
pub use tier::{count_qualifying_applications, tier_for_enrollments};
