//! # unitrack-core — Foundational Types
//!
//! Every other crate in the workspace depends on `unitrack-core`; it depends
//! on nothing internal. It holds the vocabulary shared by the commission
//! engine, the commission lifecycle, and the record store.
//!
//! ## Contents
//!
//! - **Identifiers** (`identity.rs`): `PartnerId`, `StudentId`,
//!   `ApplicationId`, `UniversityId` wrap the string ids carried by stored
//!   records. `CommissionId` is a generated UUID.
//!
//! - **Timestamps** (`temporal.rs`): UTC-only, seconds precision.
//!
//! - **Tiers** (`tier.rs`): the `bronze < silver < gold < platinum` partner
//!   classification.
//!
//! - **Application status** (`status.rs`): the workflow status vocabulary and
//!   the subset that counts toward partner tier.
//!
//! - **Records** (`records.rs`): `Partner`, `Student`, `Application`, in the
//!   camelCase shape the dashboards persist.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `unitrack-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod records;
pub mod status;
pub mod temporal;
pub mod tier;

// Re-export primary types for ergonomic imports.
pub use error::UnitrackError;
pub use identity::{ApplicationId, CommissionId, PartnerId, StudentId, UniversityId};
pub use records::{Application, Partner, Student, DEFAULT_CURRENCY};
pub use status::ApplicationStatus;
pub use temporal::Timestamp;
pub use tier::PartnerTier;
