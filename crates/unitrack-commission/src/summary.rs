//! Per-partner commission totals, grouped by lifecycle status.

use serde::{Deserialize, Serialize};

use unitrack_core::PartnerId;
use unitrack_state::{Commission, CommissionStatus};

/// Count and summed amount (net plus bonus) for one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusTotals {
    pub count: usize,
    pub amount: f64,
}

impl StatusTotals {
    fn add(&mut self, commission: &Commission) {
        self.count += 1;
        self.amount += commission.total_amount();
    }
}

/// Dashboard view of a partner's commissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCommissionSummary {
    pub partner_id: PartnerId,
    pub pending: StatusTotals,
    pub approved: StatusTotals,
    pub paid: StatusTotals,
    pub disputed: StatusTotals,
    /// Approved plus paid.
    pub total_earned: f64,
}

impl PartnerCommissionSummary {
    /// Aggregate the given commissions that belong to `partner_id`.
    pub fn from_commissions<'a>(
        partner_id: &PartnerId,
        commissions: impl IntoIterator<Item = &'a Commission>,
    ) -> Self {
        let mut summary = Self {
            partner_id: partner_id.clone(),
            pending: StatusTotals::default(),
            approved: StatusTotals::default(),
            paid: StatusTotals::default(),
            disputed: StatusTotals::default(),
            total_earned: 0.0,
        };
        for c in commissions.into_iter().filter(|c| &c.partner_id == partner_id) {
            match c.status {
                CommissionStatus::Pending => summary.pending.add(c),
                CommissionStatus::Approved => summary.approved.add(c),
                CommissionStatus::Paid => summary.paid.add(c),
                CommissionStatus::Disputed => summary.disputed.add(c),
            }
        }
        summary.total_earned = summary.approved.amount + summary.paid.amount;
        summary
    }

    pub fn total_count(&self) -> usize {
        self.pending.count + self.approved.count + self.paid.count + self.disputed.count
    }
}
