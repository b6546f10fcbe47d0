//! # unitrack-state — Commission Lifecycle
//!
//! A commission is minted once, when an application reaches enrollment
//! completion, and is never deleted. Afterwards it only moves through its
//! lifecycle:
//!
//! ```text
//! commission_pending ──▶ commission_approved ──▶ commission_paid (terminal)
//!        │  ▲                   │
//!        ▼  │ resolve           │
//! commission_disputed ◀─────────┘
//! ```
//!
//! Transitions are methods on [`Commission`] that validate the current state,
//! stamp `updatedAt`, and append to the record's transition log.

pub mod commission;

pub use commission::{
    Commission, CommissionLifecycleError, CommissionStatus, CommissionTerms,
    CommissionTransitionEvidence, CommissionTransitionRecord,
};
