//! # Commission Engine
//!
//! Binds a [`CommissionConfig`] to a [`RecordStore`] and provides the
//! operations that need stored records:
//!
//! - [`create_commission_from_application`](CommissionEngine::create_commission_from_application):
//!   mint a pending commission for an enrolled application (not persisted).
//! - [`record_enrollment`](CommissionEngine::record_enrollment): look up,
//!   check, mint, and persist in one step.
//! - [`calculate_partner_tier`](CommissionEngine::calculate_partner_tier) and
//!   [`update_partner_tiers`](CommissionEngine::update_partner_tiers).
//! - [`estimate_commission`](CommissionEngine::estimate_commission): a
//!   "what would I earn" preview.
//!
//! Minting fails only when the application's partner is missing. A missing
//! student only means no nationality bonus.

use serde::{Deserialize, Serialize};

use unitrack_core::{Application, ApplicationId, PartnerId, PartnerTier, Timestamp};
use unitrack_state::{Commission, CommissionTerms};
use unitrack_store::RecordStore;

use crate::calculation::{calculate_commission, CommissionCalculation, CommissionInputs};
use crate::config::CommissionConfig;
use crate::error::EngineError;
use crate::summary::PartnerCommissionSummary;
use crate::tier::{count_qualifying_applications, tier_for_enrollments};

/// A tier change written back by [`CommissionEngine::update_partner_tiers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierChange {
    pub partner_id: PartnerId,
    pub previous: Option<PartnerTier>,
    pub current: PartnerTier,
}

/// Result of [`CommissionEngine::estimate_commission`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionEstimate {
    /// Net commission.
    pub estimated_amount: f64,
    /// Effective rate.
    pub rate: f64,
    /// Tier the estimate was computed with.
    pub tier: PartnerTier,
}

/// Commission operations over a record store.
#[derive(Debug, Clone)]
pub struct CommissionEngine<S> {
    config: CommissionConfig,
    store: S,
}

impl<S: RecordStore> CommissionEngine<S> {
    pub fn new(config: CommissionConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// [`calculate_commission`] with this engine's configuration.
    pub fn calculate(
        &self,
        tuition_fee: f64,
        partner_tier: PartnerTier,
        inputs: &CommissionInputs<'_>,
    ) -> CommissionCalculation {
        calculate_commission(tuition_fee, partner_tier, inputs, &self.config)
    }

    /// Mint a pending commission for `application`.
    ///
    /// Uses the partner's stored tier (bronze if unset), the application's
    /// university and program, and the student's nationality when the
    /// student record exists. `enrollment_date` defaults to now.
    ///
    /// # Errors
    ///
    /// [`EngineError::PartnerNotFound`] if the application's partner is not
    /// stored.
    pub fn create_commission_from_application(
        &self,
        application: &Application,
        enrollment_date: Option<Timestamp>,
    ) -> Result<Commission, EngineError> {
        let partner = self.store.find_partner(&application.partner_id).ok_or_else(|| {
            tracing::warn!(
                application = %application.id,
                partner = %application.partner_id,
                "cannot create commission: partner not found"
            );
            EngineError::PartnerNotFound {
                partner_id: application.partner_id.clone(),
            }
        })?;
        let student = self.store.find_student(&application.student_id);
        if student.is_none() {
            tracing::debug!(
                application = %application.id,
                student = %application.student_id,
                "student not found; skipping nationality bonus"
            );
        }
        let nationality = student.as_ref().and_then(|s| s.nationality.as_deref());

        let tier = partner.tier.unwrap_or_default();
        let inputs = CommissionInputs {
            university_id: Some(application.university_id.as_str()),
            program_name: Some(application.program_name.as_str()),
            nationality,
        };
        let calc = self.calculate(application.tuition_fee, tier, &inputs);

        let commission = Commission::new_pending(
            CommissionTerms {
                application_id: application.id.clone(),
                student_id: application.student_id.clone(),
                partner_id: application.partner_id.clone(),
                university_id: application.university_id.clone(),
                program_name: application.program_name.clone(),
                tuition_fee: application.tuition_fee,
                commission_rate: calc.effective_rate,
                commission_amount: calc.net_commission,
                currency: application.currency.clone(),
            },
            enrollment_date.unwrap_or_else(Timestamp::now),
        );
        tracing::info!(
            commission = %commission.id,
            application = %application.id,
            partner = %application.partner_id,
            tier = %tier,
            rate = calc.effective_rate,
            amount = calc.net_commission,
            "created commission"
        );
        Ok(commission)
    }

    /// Mint and persist the commission for a stored, enrolled application.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ApplicationNotFound`] if no application has this id.
    /// - [`EngineError::NotEnrolled`] unless its status is `enrollment_completed`.
    /// - [`EngineError::CommissionAlreadyExists`] if one was already minted.
    /// - [`EngineError::PartnerNotFound`] as for
    ///   [`create_commission_from_application`](Self::create_commission_from_application).
    pub fn record_enrollment(
        &self,
        application_id: &ApplicationId,
        enrollment_date: Option<Timestamp>,
    ) -> Result<Commission, EngineError> {
        let application = self.store.find_application(application_id).ok_or_else(|| {
            EngineError::ApplicationNotFound {
                application_id: application_id.clone(),
            }
        })?;
        if !application.status.is_enrollment_completed() {
            return Err(EngineError::NotEnrolled {
                application_id: application_id.clone(),
                status: application.status.to_string(),
            });
        }
        if let Some(existing) = self
            .store
            .commissions()
            .into_iter()
            .find(|c| &c.application_id == application_id)
        {
            return Err(EngineError::CommissionAlreadyExists {
                application_id: application_id.clone(),
                commission_id: existing.id,
            });
        }
        let commission = self.create_commission_from_application(&application, enrollment_date)?;
        self.store.save_commission(commission.clone());
        Ok(commission)
    }

    /// Tier earned by the partner's qualifying applications.
    pub fn calculate_partner_tier(&self, partner_id: &PartnerId) -> PartnerTier {
        let applications = self.store.applications();
        let qualifying = count_qualifying_applications(&applications, partner_id);
        let tier = tier_for_enrollments(qualifying, &self.config);
        tracing::debug!(partner = %partner_id, qualifying, tier = %tier, "calculated partner tier");
        tier
    }

    /// Recompute every partner's tier, saving only those that changed.
    ///
    /// A partner with no stored tier always counts as changed.
    pub fn update_partner_tiers(&self) -> Vec<TierChange> {
        let mut changes = Vec::new();
        for mut partner in self.store.partners() {
            let current = self.calculate_partner_tier(&partner.id);
            if partner.tier == Some(current) {
                continue;
            }
            tracing::info!(
                partner = %partner.id,
                from = ?partner.tier,
                to = %current,
                "partner tier changed"
            );
            changes.push(TierChange {
                partner_id: partner.id.clone(),
                previous: partner.tier,
                current,
            });
            partner.tier = Some(current);
            self.store.save_partner(partner);
        }
        changes
    }

    /// Preview the net commission for a prospective enrollment.
    ///
    /// Uses the partner's stored tier, or a freshly computed one when the
    /// partner is unknown or has no tier.
    pub fn estimate_commission(
        &self,
        tuition_fee: f64,
        partner_id: &PartnerId,
        inputs: &CommissionInputs<'_>,
    ) -> CommissionEstimate {
        let tier = self
            .store
            .find_partner(partner_id)
            .and_then(|p| p.tier)
            .unwrap_or_else(|| self.calculate_partner_tier(partner_id));
        let calc = self.calculate(tuition_fee, tier, inputs);
        CommissionEstimate {
            estimated_amount: calc.net_commission,
            rate: calc.effective_rate,
            tier,
        }
    }

    /// Totals of the partner's stored commissions by status.
    pub fn summarize_partner_commissions(
        &self,
        partner_id: &PartnerId,
    ) -> PartnerCommissionSummary {
        let commissions = self.store.commissions_for_partner(partner_id);
        PartnerCommissionSummary::from_commissions(partner_id, &commissions)
    }
}
