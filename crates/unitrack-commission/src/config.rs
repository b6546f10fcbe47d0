//! # Commission Configuration
//!
//! Tier rates and thresholds, special-rate tables, and deduction fractions.
//! The built-in table is [`CommissionConfig::default()`]; deployments may
//! load their own from YAML or JSON:
//!
//! ```yaml
//! tiers:
//!   bronze: { rate: 0.10, minimumStudents: 0 }
//!   silver: { rate: 0.125, minimumStudents: 10 }
//! specialRates:
//!   byUniversity: { university_of_malaya: 0.18 }
//!   byProgram: { medicine: 0.08 }
//!   byCountry: { sudan: 0.02 }
//! processingFee: 0.02
//! taxRate: 0.0
//! ```
//!
//! ## Invariants
//!
//! Every rate, bonus, and deduction is a fraction in `[0, 1]`, and tier
//! minimums strictly increase with tier rank. [`CommissionConfig::validate`]
//! checks both and reports every violation at once.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use unitrack_core::PartnerTier;

use crate::error::ConfigError;

/// Rate and qualification threshold for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRule {
    /// Default commission rate for partners in this tier.
    pub rate: f64,
    /// Qualifying enrollments needed to reach this tier.
    pub minimum_students: u32,
}

/// Special-rate tables consulted after the tier rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRates {
    /// University id → absolute override rate. Matched exactly.
    #[serde(default)]
    pub by_university: BTreeMap<String, f64>,
    /// Lower-cased program name → absolute override rate.
    #[serde(default)]
    pub by_program: BTreeMap<String, f64>,
    /// Lower-cased nationality → additive bonus.
    #[serde(default)]
    pub by_country: BTreeMap<String, f64>,
}

/// Full commission configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionConfig {
    pub tiers: BTreeMap<PartnerTier, TierRule>,
    #[serde(default)]
    pub special_rates: SpecialRates,
    /// Fraction of gross commission withheld as a processing fee.
    #[serde(default)]
    pub processing_fee: f64,
    /// Fraction of gross commission withheld as tax.
    #[serde(default)]
    pub tax_rate: f64,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        let tiers = BTreeMap::from([
            (PartnerTier::Bronze, TierRule { rate: 0.10, minimum_students: 0 }),
            (PartnerTier::Silver, TierRule { rate: 0.125, minimum_students: 10 }),
            (PartnerTier::Gold, TierRule { rate: 0.15, minimum_students: 25 }),
            (PartnerTier::Platinum, TierRule { rate: 0.175, minimum_students: 50 }),
        ]);
        let special_rates = SpecialRates {
            by_university: table(&[
                ("university_of_malaya", 0.18),
                ("monash_university_malaysia", 0.16),
                ("taylors_university", 0.14),
            ]),
            by_program: table(&[("medicine", 0.08), ("dentistry", 0.08), ("pharmacy", 0.10)]),
            by_country: table(&[("sudan", 0.02), ("yemen", 0.02), ("somalia", 0.015)]),
        };
        Self {
            tiers,
            special_rates,
            processing_fee: 0.02,
            tax_rate: 0.0,
        }
    }
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Case-folded lookup: both the stored key and the needle are lower-cased.
///
/// Returns the folded key with its value so the breakdown can name it.
fn lookup_folded(map: &BTreeMap<String, f64>, needle: &str) -> Option<(String, f64)> {
    let folded = needle.to_lowercase();
    map.iter()
        .find(|(key, _)| key.to_lowercase() == folded)
        .map(|(_, rate)| (folded, *rate))
}

impl CommissionConfig {
    /// Rate and threshold for a tier, if configured.
    pub fn tier_rule(&self, tier: PartnerTier) -> Option<&TierRule> {
        self.tiers.get(&tier)
    }

    /// Absolute override rate for a university id (exact match).
    pub fn university_rate(&self, university_id: &str) -> Option<f64> {
        self.special_rates.by_university.get(university_id).copied()
    }

    /// Override rate for a program, matched case-insensitively.
    ///
    /// Returns the lower-cased program key alongside the rate.
    pub fn program_rate(&self, program_name: &str) -> Option<(String, f64)> {
        lookup_folded(&self.special_rates.by_program, program_name)
    }

    /// Additive bonus for a nationality, matched case-insensitively.
    ///
    /// Returns the lower-cased country key alongside the bonus.
    pub fn country_bonus(&self, nationality: &str) -> Option<(String, f64)> {
        lookup_folded(&self.special_rates.by_country, nationality)
    }

    /// Lower-case the program and country table keys.
    ///
    /// On a collision after folding, the entry whose original key sorts last wins.
    pub fn normalized(mut self) -> Self {
        let fold = |m: BTreeMap<String, f64>| -> BTreeMap<String, f64> {
            m.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
        };
        self.special_rates.by_program = fold(self.special_rates.by_program);
        self.special_rates.by_country = fold(self.special_rates.by_country);
        self
    }

    /// Check every invariant, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        let mut check_fraction = |what: String, value: f64| {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                violations.push(format!("{what} must be a fraction in [0, 1], got {value}"));
            }
        };

        for (tier, rule) in &self.tiers {
            check_fraction(format!("tiers.{tier}.rate"), rule.rate);
        }
        for (id, rate) in &self.special_rates.by_university {
            check_fraction(format!("specialRates.byUniversity.{id}"), *rate);
        }
        for (name, rate) in &self.special_rates.by_program {
            check_fraction(format!("specialRates.byProgram.{name}"), *rate);
        }
        for (country, bonus) in &self.special_rates.by_country {
            check_fraction(format!("specialRates.byCountry.{country}"), *bonus);
        }
        check_fraction("processingFee".to_string(), self.processing_fee);
        check_fraction("taxRate".to_string(), self.tax_rate);

        // BTreeMap iterates in tier rank order.
        let mut previous: Option<(PartnerTier, u32)> = None;
        for (tier, rule) in &self.tiers {
            if let Some((prev_tier, prev_min)) = previous {
                if rule.minimum_students <= prev_min {
                    violations.push(format!(
                        "tiers.{tier}.minimumStudents ({}) must exceed tiers.{prev_tier}.minimumStudents ({prev_min})",
                        rule.minimum_students
                    ));
                }
            }
            previous = Some((*tier, rule.minimum_students));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }

    /// Parse a YAML document, normalize, and validate.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.finish()
    }

    /// Parse a JSON document, normalize, and validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.finish()
    }

    /// Load from a `.yaml`, `.yml`, or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let raw = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw()?)?,
            Some("json") => Self::from_json_str(&raw()?)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        tracing::debug!(
            path = %path.display(),
            tiers = config.tiers.len(),
            "loaded commission config"
        );
        Ok(config)
    }

    fn finish(self) -> Result<Self, ConfigError> {
        let config = self.normalized();
        config.validate()?;
        Ok(config)
    }
}
