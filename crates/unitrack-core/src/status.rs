//! # Application Status Vocabulary
//!
//! Applications move through a five-stage workflow (submission, university
//! review, offer, visa, enrollment) whose statuses, display copy, and allowed
//! transitions are static lookup data owned by the dashboards. The commission
//! engine only needs to recognise the statuses at or beyond enrollment, so the
//! status is kept as an open string vocabulary rather than a closed enum;
//! unknown statuses survive a load/save cycle untouched.

use serde::{Deserialize, Serialize};

/// Workflow status of an application, e.g. `offer_received`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationStatus(String);

impl ApplicationStatus {
    pub const ENROLLMENT_COMPLETED: &'static str = "enrollment_completed";
    pub const COMMISSION_PENDING: &'static str = "commission_pending";
    pub const COMMISSION_APPROVED: &'static str = "commission_approved";
    pub const COMMISSION_PAID: &'static str = "commission_paid";

    /// Statuses that count as a completed enrollment for partner tiering.
    pub const TIER_QUALIFYING: [&'static str; 4] = [
        Self::ENROLLMENT_COMPLETED,
        Self::COMMISSION_PENDING,
        Self::COMMISSION_APPROVED,
        Self::COMMISSION_PAID,
    ];

    /// Wrap a status string as stored.
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an application in this status counts toward its partner's tier.
    pub fn counts_toward_tier(&self) -> bool {
        Self::TIER_QUALIFYING.contains(&self.0.as_str())
    }

    /// Whether the application has reached enrollment completion, i.e. a
    /// commission may be minted for it.
    pub fn is_enrollment_completed(&self) -> bool {
        self.0 == Self::ENROLLMENT_COMPLETED
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}
