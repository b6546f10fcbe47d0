//! # Commission Calculation
//!
//! [`calculate_commission`] applies the rate cascade in fixed order:
//!
//! 1. Tier base rate.
//! 2. University override (replaces).
//! 3. Program override (replaces), only when no university override applied.
//! 4. Nationality bonus (adds), regardless of overrides.
//!
//! then derives gross, processing fee, tax, and net. Unknown keys skip their
//! step. Arithmetic is plain `f64` with no rounding; only the breakdown lines
//! are rounded, to two decimals, when rendered.

use serde::{Deserialize, Serialize};

use unitrack_core::PartnerTier;

use crate::config::CommissionConfig;

/// Optional identifiers that may trigger overrides or a bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommissionInputs<'a> {
    pub university_id: Option<&'a str>,
    pub program_name: Option<&'a str>,
    pub nationality: Option<&'a str>,
}

impl<'a> CommissionInputs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn university(mut self, university_id: &'a str) -> Self {
        self.university_id = Some(university_id);
        self
    }

    pub fn program(mut self, program_name: &'a str) -> Self {
        self.program_name = Some(program_name);
        self
    }

    pub fn nationality(mut self, nationality: &'a str) -> Self {
        self.nationality = Some(nationality);
        self
    }
}

/// Rates, amounts, and the ordered audit trail of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionCalculation {
    /// The tier rate the cascade started from.
    pub base_rate: f64,
    /// Rate after overrides and bonus.
    pub effective_rate: f64,
    pub gross_commission: f64,
    pub processing_fee: f64,
    pub tax_amount: f64,
    /// `gross_commission - processing_fee - tax_amount`.
    pub net_commission: f64,
    /// One line per applied adjustment and per final amount, in order.
    pub breakdown: Vec<String>,
}

fn pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Compute the commission for one enrollment.
pub fn calculate_commission(
    tuition_fee: f64,
    partner_tier: PartnerTier,
    inputs: &CommissionInputs<'_>,
    config: &CommissionConfig,
) -> CommissionCalculation {
    let mut breakdown = Vec::new();

    let base_rate = match config.tier_rule(partner_tier) {
        Some(rule) => {
            breakdown.push(format!("Base rate ({partner_tier} tier): {}", pct(rule.rate)));
            rule.rate
        }
        None => {
            tracing::warn!(tier = %partner_tier, "no rate configured for tier");
            breakdown.push(format!("No base rate configured for {partner_tier} tier"));
            0.0
        }
    };
    let mut effective_rate = base_rate;

    let university_rate = inputs
        .university_id
        .and_then(|id| config.university_rate(id).map(|rate| (id, rate)));

    if let Some((id, rate)) = university_rate {
        effective_rate = rate;
        breakdown.push(format!("University special rate ({id}): {}", pct(rate)));
    } else if let Some((key, rate)) = inputs.program_name.and_then(|p| config.program_rate(p)) {
        effective_rate = rate;
        breakdown.push(format!("Program special rate ({key}): {}", pct(rate)));
    }

    if let Some((key, bonus)) = inputs.nationality.and_then(|n| config.country_bonus(n)) {
        effective_rate += bonus;
        breakdown.push(format!("Country bonus ({key}): +{}", pct(bonus)));
    }

    if effective_rate < 0.0 {
        effective_rate = 0.0;
        breakdown.push(format!("Effective rate floored at {}", pct(0.0)));
    }

    let gross_commission = tuition_fee * effective_rate;
    let processing_fee = gross_commission * config.processing_fee;
    let tax_amount = gross_commission * config.tax_rate;
    let net_commission = gross_commission - processing_fee - tax_amount;

    breakdown.push(format!("Gross commission: {}", amount(gross_commission)));
    breakdown.push(format!(
        "Processing fee ({}): {}",
        pct(config.processing_fee),
        amount(processing_fee)
    ));
    breakdown.push(format!("Tax ({}): {}", pct(config.tax_rate), amount(tax_amount)));
    breakdown.push(format!("Net commission: {}", amount(net_commission)));

    tracing::debug!(
        tier = %partner_tier,
        base_rate,
        effective_rate,
        gross_commission,
        net_commission,
        "calculated commission"
    );

    CommissionCalculation {
        base_rate,
        effective_rate,
        gross_commission,
        processing_fee,
        tax_amount,
        net_commission,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS * b.abs().max(1.0)
    }

    fn calc(
        tuition: f64,
        tier: PartnerTier,
        inputs: CommissionInputs<'_>,
    ) -> CommissionCalculation {
        calculate_commission(tuition, tier, &inputs, &CommissionConfig::default())
    }

    #[test]
    fn gold_tier_without_overrides() {
        let r = calc(45000.0, PartnerTier::Gold, CommissionInputs::new());
        assert!(close(r.base_rate, 0.15));
        assert!(close(r.effective_rate, 0.15));
        assert!(close(r.gross_commission, 6750.0));
        assert!(close(r.processing_fee, 135.0));
        assert_eq!(r.tax_amount, 0.0);
        assert!(close(r.net_commission, 6615.0));
        assert_eq!(
            r.breakdown,
            vec![
                "Base rate (gold tier): 15.00%",
                "Gross commission: 6750.00",
                "Processing fee (2.00%): 135.00",
                "Tax (0.00%): 0.00",
                "Net commission: 6615.00",
            ]
        );
    }

    #[test]
    fn university_override_replaces_tier_rate() {
        let r = calc(
            180000.0,
            PartnerTier::Bronze,
            CommissionInputs::new().university("university_of_malaya"),
        );
        assert!(close(r.base_rate, 0.10));
        assert!(close(r.effective_rate, 0.18));
        assert!(close(r.gross_commission, 32400.0));
        assert_eq!(r.breakdown[0], "Base rate (bronze tier): 10.00%");
        assert_eq!(r.breakdown[1], "University special rate (university_of_malaya): 18.00%");
        assert_eq!(r.breakdown[2], "Gross commission: 32400.00");
    }

    #[test]
    fn program_override_is_case_insensitive() {
        let r = calc(50000.0, PartnerTier::Silver, CommissionInputs::new().program("Medicine"));
        assert!(close(r.base_rate, 0.125));
        assert!(close(r.effective_rate, 0.08));
        assert!(close(r.gross_commission, 4000.0));
        assert_eq!(r.breakdown[0], "Base rate (silver tier): 12.50%");
        assert_eq!(r.breakdown[1], "Program special rate (medicine): 8.00%");
    }

    #[test]
    fn country_bonus_adds_to_base() {
        let r = calc(50000.0, PartnerTier::Bronze, CommissionInputs::new().nationality("Sudan"));
        assert!(close(r.effective_rate, 0.12));
        assert!(close(r.gross_commission, 6000.0));
        assert_eq!(r.breakdown[1], "Country bonus (sudan): +2.00%");
        assert_eq!(r.breakdown.len(), 6);
    }

    #[test]
    fn university_beats_program() {
        let r = calc(
            100000.0,
            PartnerTier::Gold,
            CommissionInputs::new()
                .university("university_of_malaya")
                .program("medicine"),
        );
        assert!(close(r.effective_rate, 0.18));
        assert!(!r.breakdown.iter().any(|l| l.starts_with("Program special rate")));
    }

    #[test]
    fn program_applies_when_university_unknown() {
        let r = calc(
            100000.0,
            PartnerTier::Gold,
            CommissionInputs::new().university("unknown_uni").program("PHARMACY"),
        );
        assert!(close(r.effective_rate, 0.10));
        assert_eq!(r.breakdown[1], "Program special rate (pharmacy): 10.00%");
    }

    #[test]
    fn bonus_stacks_on_university_override() {
        let r = calc(
            100000.0,
            PartnerTier::Silver,
            CommissionInputs::new()
                .university("university_of_malaya")
                .nationality("YEMEN"),
        );
        assert!(close(r.effective_rate, 0.20));
        assert_eq!(
            r.breakdown[..3],
            [
                "Base rate (silver tier): 12.50%".to_string(),
                "University special rate (university_of_malaya): 18.00%".to_string(),
                "Country bonus (yemen): +2.00%".to_string(),
            ]
        );
    }

    #[test]
    fn bonus_stacks_on_program_override() {
        let r = calc(
            10000.0,
            PartnerTier::Bronze,
            CommissionInputs::new().program("dentistry").nationality("somalia"),
        );
        assert!(close(r.effective_rate, 0.095));
        assert!(close(r.gross_commission, 950.0));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let r = calc(
            20000.0,
            PartnerTier::Silver,
            CommissionInputs::new()
                .university("nowhere")
                .program("Basket Weaving")
                .nationality("Atlantis"),
        );
        assert!(close(r.effective_rate, 0.125));
        assert_eq!(r.breakdown.len(), 5);
    }

    #[test]
    fn missing_tier_rule_starts_from_zero() {
        let mut config = CommissionConfig::default();
        config.tiers.remove(&PartnerTier::Platinum);
        let r = calculate_commission(
            10000.0,
            PartnerTier::Platinum,
            &CommissionInputs::new().nationality("sudan"),
            &config,
        );
        assert_eq!(r.base_rate, 0.0);
        assert!(close(r.effective_rate, 0.02));
        assert_eq!(r.breakdown[0], "No base rate configured for platinum tier");
    }

    #[test]
    fn tax_is_deducted_from_gross() {
        let mut config = CommissionConfig::default();
        config.tax_rate = 0.06;
        let r = calculate_commission(45000.0, PartnerTier::Gold, &CommissionInputs::new(), &config);
        assert!(close(r.tax_amount, 405.0));
        assert!(close(r.net_commission, 6750.0 - 135.0 - 405.0));
        assert_eq!(r.breakdown[3], "Tax (6.00%): 405.00");
        assert_eq!(r.breakdown[4], "Net commission: 6210.00");
    }

    #[test]
    fn negative_rate_is_floored() {
        let mut config = CommissionConfig::default();
        config.special_rates.by_country.insert("penalty".to_string(), -0.5);
        let r = calculate_commission(
            1000.0,
            PartnerTier::Bronze,
            &CommissionInputs::new().nationality("penalty"),
            &config,
        );
        assert_eq!(r.effective_rate, 0.0);
        assert_eq!(r.gross_commission, 0.0);
        assert_eq!(r.breakdown[2], "Effective rate floored at 0.00%");
    }

    #[test]
    fn zero_tuition_yields_zero_amounts() {
        let r = calc(0.0, PartnerTier::Platinum, CommissionInputs::new());
        assert!(close(r.effective_rate, 0.175));
        assert_eq!(r.net_commission, 0.0);
    }

    #[test]
    fn serializes_camel_case() {
        let r = calc(45000.0, PartnerTier::Gold, CommissionInputs::new());
        let v = serde_json::to_value(&r).unwrap();
        assert!(v.get("netCommission").is_some());
        assert!(v.get("effectiveRate").is_some());
        assert_eq!(v["breakdown"].as_array().unwrap().len(), 5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn tier() -> impl Strategy<Value = PartnerTier> {
            prop::sample::select(PartnerTier::all().to_vec())
        }

        fn optional_key(
            keys: &'static [&'static str],
        ) -> impl Strategy<Value = Option<&'static str>> {
            prop::option::of(prop::sample::select(keys.to_vec()))
        }

        proptest! {
            /// Without overrides the tier rate is the effective rate.
            #[test]
            fn tier_rate_stands_alone(t in tier(), fee in 0.0f64..1_000_000.0) {
                let config = CommissionConfig::default();
                let r = calculate_commission(fee, t, &CommissionInputs::new(), &config);
                let rate = config.tier_rule(t).unwrap().rate;
                prop_assert_eq!(r.effective_rate, rate);
                prop_assert_eq!(r.gross_commission, fee * rate);
            }

            /// Net is always gross minus both deductions, bit for bit.
            #[test]
            fn net_identity_holds(
                t in tier(),
                fee in 0.0f64..1_000_000.0,
                uni in optional_key(&["university_of_malaya", "taylors_university", "unknown"]),
                program in optional_key(&["Medicine", "pharmacy", "Law"]),
                nat in optional_key(&["Sudan", "somalia", "Malaysia"]),
                tax in 0.0f64..0.3,
            ) {
                let mut config = CommissionConfig::default();
                config.tax_rate = tax;
                let inputs = CommissionInputs {
                    university_id: uni,
                    program_name: program,
                    nationality: nat,
                };
                let r = calculate_commission(fee, t, &inputs, &config);
                let expected = r.gross_commission - r.processing_fee - r.tax_amount;
                prop_assert_eq!(r.net_commission, expected);
                prop_assert!(r.effective_rate >= 0.0);
                let last = format!("Net commission: {:.2}", r.net_commission);
                prop_assert_eq!(r.breakdown.last().unwrap(), &last);
            }

            /// The country bonus adds exactly its value to whatever rate the overrides left.
            #[test]
            fn bonus_is_additive(
                t in tier(),
                uni in optional_key(&["university_of_malaya", "unknown"]),
                program in optional_key(&["medicine", "law"]),
            ) {
                let config = CommissionConfig::default();
                let without = CommissionInputs {
                    university_id: uni,
                    program_name: program,
                    nationality: None,
                };
                let with = CommissionInputs { nationality: Some("sudan"), ..without };
                let a = calculate_commission(1000.0, t, &without, &config);
                let b = calculate_commission(1000.0, t, &with, &config);
                prop_assert_eq!(b.effective_rate, a.effective_rate + 0.02);
            }
        }
    }
}
