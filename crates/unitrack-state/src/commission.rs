//! # Commission Record and Lifecycle State Machine
//!
//! ## States
//!
//! ```text
//! Pending ──▶ Approved ──▶ Paid (terminal)
//!    │  ▲        │
//!    ▼  │        │
//! Disputed ◀─────┘
//! ```
//!
//! - `approve`: Pending → Approved
//! - `mark_paid`: Approved → Paid
//! - `dispute`: Pending | Approved → Disputed
//! - `resolve_dispute`: Disputed → Pending
//!
//! Verification flags and bonus adjustments do not change the status but are
//! refused once the commission is paid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use unitrack_core::{ApplicationId, CommissionId, PartnerId, StudentId, Timestamp, UniversityId};

// ─── Commission Status ───────────────────────────────────────────────

/// Lifecycle status of a commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommissionStatus {
    /// Awaiting admin approval.
    #[serde(rename = "commission_pending")]
    Pending,
    /// Approved for payout.
    #[serde(rename = "commission_approved")]
    Approved,
    /// Paid out to the partner (terminal).
    #[serde(rename = "commission_paid")]
    Paid,
    /// Contested by the partner or an admin; returns to pending on resolution.
    #[serde(rename = "commission_disputed")]
    Disputed,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "commission_pending",
            Self::Approved => "commission_approved",
            Self::Paid => "commission_paid",
            Self::Disputed => "commission_disputed",
        }
    }

    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// All statuses, in lifecycle order.
    pub fn all() -> &'static [CommissionStatus] {
        &[Self::Pending, Self::Approved, Self::Paid, Self::Disputed]
    }
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by commission lifecycle operations.
#[derive(Error, Debug)]
pub enum CommissionLifecycleError {
    /// Attempted transition is not valid from the current state.
    #[error("invalid commission transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: CommissionStatus,
        /// Attempted target state.
        to: CommissionStatus,
    },

    /// The commission has been paid and can no longer change.
    #[error("commission is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: CommissionStatus,
    },

    /// A bonus amount was negative or not finite.
    #[error("invalid bonus amount: {0}")]
    InvalidAmount(f64),
}

// ─── Transition Evidence ─────────────────────────────────────────────

/// Justification supplied with a lifecycle transition.
#[derive(Debug, Clone)]
pub struct CommissionTransitionEvidence {
    /// Reason for the transition. For disputes this becomes the dispute reason.
    pub reason: String,
    /// Admin or partner who initiated the transition.
    pub actor: Option<String>,
}

impl CommissionTransitionEvidence {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            actor: None,
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Record of a commission state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionTransitionRecord {
    pub from_state: CommissionStatus,
    pub to_state: CommissionStatus,
    pub timestamp: Timestamp,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

// ─── Commission ──────────────────────────────────────────────────────

/// The computed terms a new commission is minted with.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionTerms {
    pub application_id: ApplicationId,
    pub student_id: StudentId,
    pub partner_id: PartnerId,
    pub university_id: UniversityId,
    pub program_name: String,
    pub tuition_fee: f64,
    /// Effective rate after overrides and bonuses.
    pub commission_rate: f64,
    /// Net commission after processing fee and tax.
    pub commission_amount: f64,
    pub currency: String,
}

/// A commission owed to a partner for one completed enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: CommissionId,
    pub application_id: ApplicationId,
    pub student_id: StudentId,
    pub partner_id: PartnerId,
    pub university_id: UniversityId,
    pub program_name: String,
    pub tuition_fee: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub bonus_commission: f64,
    pub currency: String,
    pub status: CommissionStatus,
    pub enrollment_date: Timestamp,
    pub enrollment_verified: bool,
    pub student_attendance_confirmed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispute_reason: Option<String>,
    /// Ordered log of all state transitions.
    #[serde(default)]
    pub transitions: Vec<CommissionTransitionRecord>,
}

impl Commission {
    /// Mint a pending commission with a fresh id, unverified flags, no bonus,
    /// and both record timestamps set to now.
    pub fn new_pending(terms: CommissionTerms, enrollment_date: Timestamp) -> Self {
        let now = Timestamp::now();
        Self {
            id: CommissionId::new(),
            application_id: terms.application_id,
            student_id: terms.student_id,
            partner_id: terms.partner_id,
            university_id: terms.university_id,
            program_name: terms.program_name,
            tuition_fee: terms.tuition_fee,
            commission_rate: terms.commission_rate,
            commission_amount: terms.commission_amount,
            bonus_commission: 0.0,
            currency: terms.currency,
            status: CommissionStatus::Pending,
            enrollment_date,
            enrollment_verified: false,
            student_attendance_confirmed: false,
            created_at: now,
            updated_at: now,
            approved_at: None,
            paid_at: None,
            dispute_reason: None,
            transitions: Vec::new(),
        }
    }

    /// Net commission plus any bonus.
    pub fn total_amount(&self) -> f64 {
        self.commission_amount + self.bonus_commission
    }

    /// Approve for payout (PENDING → APPROVED).
    pub fn approve(
        &mut self,
        evidence: CommissionTransitionEvidence,
    ) -> Result<(), CommissionLifecycleError> {
        self.require_state(&[CommissionStatus::Pending], CommissionStatus::Approved)?;
        let at = self.do_transition(CommissionStatus::Approved, evidence);
        self.approved_at = Some(at);
        Ok(())
    }

    /// Record payout (APPROVED → PAID).
    pub fn mark_paid(
        &mut self,
        evidence: CommissionTransitionEvidence,
    ) -> Result<(), CommissionLifecycleError> {
        self.require_state(&[CommissionStatus::Approved], CommissionStatus::Paid)?;
        let at = self.do_transition(CommissionStatus::Paid, evidence);
        self.paid_at = Some(at);
        Ok(())
    }

    /// Raise a dispute (PENDING or APPROVED → DISPUTED).
    ///
    /// The evidence reason is kept as the dispute reason.
    pub fn dispute(
        &mut self,
        evidence: CommissionTransitionEvidence,
    ) -> Result<(), CommissionLifecycleError> {
        self.require_state(
            &[CommissionStatus::Pending, CommissionStatus::Approved],
            CommissionStatus::Disputed,
        )?;
        self.dispute_reason = Some(evidence.reason.clone());
        self.approved_at = None;
        self.do_transition(CommissionStatus::Disputed, evidence);
        Ok(())
    }

    /// Resolve a dispute, returning the commission to review (DISPUTED → PENDING).
    pub fn resolve_dispute(
        &mut self,
        evidence: CommissionTransitionEvidence,
    ) -> Result<(), CommissionLifecycleError> {
        self.require_state(&[CommissionStatus::Disputed], CommissionStatus::Pending)?;
        self.dispute_reason = None;
        self.do_transition(CommissionStatus::Pending, evidence);
        Ok(())
    }

    /// Mark the enrollment as verified with the university.
    pub fn verify_enrollment(&mut self) -> Result<(), CommissionLifecycleError> {
        self.require_mutable()?;
        self.enrollment_verified = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the student's attendance as confirmed.
    pub fn confirm_attendance(&mut self) -> Result<(), CommissionLifecycleError> {
        self.require_mutable()?;
        self.student_attendance_confirmed = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Add to the bonus commission. Bonuses accumulate.
    pub fn add_bonus(&mut self, amount: f64) -> Result<(), CommissionLifecycleError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommissionLifecycleError::InvalidAmount(amount));
        }
        self.require_mutable()?;
        self.bonus_commission += amount;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn require_mutable(&self) -> Result<(), CommissionLifecycleError> {
        if self.status.is_terminal() {
            return Err(CommissionLifecycleError::TerminalState { state: self.status });
        }
        Ok(())
    }

    fn require_state(
        &self,
        allowed: &[CommissionStatus],
        target: CommissionStatus,
    ) -> Result<(), CommissionLifecycleError> {
        self.require_mutable()?;
        if !allowed.contains(&self.status) {
            return Err(CommissionLifecycleError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn do_transition(
        &mut self,
        to: CommissionStatus,
        evidence: CommissionTransitionEvidence,
    ) -> Timestamp {
        let now = Timestamp::now();
        tracing::debug!(
            commission = %self.id,
            from = %self.status,
            to = %to,
            "commission transition"
        );
        self.transitions.push(CommissionTransitionRecord {
            from_state: self.status,
            to_state: to,
            timestamp: now,
            reason: evidence.reason,
            actor: evidence.actor,
        });
        self.status = to;
        self.updated_at = now;
        now
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
