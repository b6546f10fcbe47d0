//! # Partner Tier Ladder
//!
//! A partner's tier follows from how many of its applications reached
//! enrollment or commission processing. The ladder is checked from the top:
//! gold, then silver, and bronze is the floor.
//!
//! Platinum has a rate and threshold in the configuration but is not a rung
//! of this ladder, so it is never assigned here. Partners can only hold
//! platinum if it is set on their record directly.

use unitrack_core::{Application, PartnerId, PartnerTier};

use crate::config::CommissionConfig;

/// Rungs checked in order; the first whose threshold is met wins.
const LADDER: [PartnerTier; 2] = [PartnerTier::Gold, PartnerTier::Silver];

/// Count a partner's applications whose status counts toward tier.
pub fn count_qualifying_applications(
    applications: &[Application],
    partner_id: &PartnerId,
) -> usize {
    applications
        .iter()
        .filter(|a| &a.partner_id == partner_id && a.status.counts_toward_tier())
        .count()
}

/// Highest ladder tier whose `minimum_students` is met, else bronze.
///
/// Rungs missing from the configuration are skipped.
pub fn tier_for_enrollments(qualifying: usize, config: &CommissionConfig) -> PartnerTier {
    LADDER
        .into_iter()
        .find(|tier| {
            config
                .tier_rule(*tier)
                .is_some_and(|rule| qualifying >= rule.minimum_students as usize)
        })
        .unwrap_or(PartnerTier::Bronze)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apps(partner: &str, statuses: &[&str]) -> Vec<Application> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Application::new(
                    format!("{partner}-app-{i}"),
                    format!("stu-{i}"),
                    partner,
                    "taylors_university",
                    "Business",
                    20000.0,
                    *s,
                )
            })
            .collect()
    }

    #[test]
    fn counts_only_qualifying_statuses_for_partner() {
        let mut all = apps(
            "p1",
            &[
                "enrollment_completed",
                "commission_pending",
                "commission_approved",
                "commission_paid",
                "offer_received",
                "visa_rejected",
            ],
        );
        all.extend(apps("p2", &["enrollment_completed", "commission_paid"]));
        assert_eq!(count_qualifying_applications(&all, &"p1".into()), 4);
        assert_eq!(count_qualifying_applications(&all, &"p2".into()), 2);
        assert_eq!(count_qualifying_applications(&all, &"p3".into()), 0);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let c = CommissionConfig::default();
        assert_eq!(tier_for_enrollments(0, &c), PartnerTier::Bronze);
        assert_eq!(tier_for_enrollments(9, &c), PartnerTier::Bronze);
        assert_eq!(tier_for_enrollments(10, &c), PartnerTier::Silver);
        assert_eq!(tier_for_enrollments(12, &c), PartnerTier::Silver);
        assert_eq!(tier_for_enrollments(24, &c), PartnerTier::Silver);
        assert_eq!(tier_for_enrollments(25, &c), PartnerTier::Gold);
    }

    #[test]
    fn platinum_is_never_assigned() {
        let c = CommissionConfig::default();
        assert_eq!(tier_for_enrollments(50, &c), PartnerTier::Gold);
        assert_eq!(tier_for_enrollments(10_000, &c), PartnerTier::Gold);
    }

    #[test]
    fn missing_rung_is_skipped() {
        let mut c = CommissionConfig::default();
        c.tiers.remove(&PartnerTier::Gold);
        assert_eq!(tier_for_enrollments(100, &c), PartnerTier::Silver);
        c.tiers.remove(&PartnerTier::Silver);
        assert_eq!(tier_for_enrollments(100, &c), PartnerTier::Bronze);
    }

    proptest! {
        /// More qualifying enrollments never lower the tier.
        #[test]
        fn ladder_is_monotonic(a in 0usize..200, b in 0usize..200) {
            let c = CommissionConfig::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tier_for_enrollments(lo, &c) <= tier_for_enrollments(hi, &c));
        }
    }
}
