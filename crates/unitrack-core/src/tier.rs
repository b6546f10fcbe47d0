//! # Partner Tiers
//!
//! Partners are classified by how many of their students reached enrollment.
//! The tier drives the default commission rate. Variants are declared in rank
//! order, so the derived `Ord` sorts `bronze < silver < gold < platinum`.

use serde::{Deserialize, Serialize};

use crate::error::UnitrackError;

/// Partner classification driving the default commission rate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PartnerTier {
    /// Entry tier; the floor every partner starts from.
    #[default]
    Bronze,
    Silver,
    Gold,
    /// Configured with a rate and threshold, but never assigned by the
    /// enrollment-count ladder.
    Platinum,
}

impl PartnerTier {
    /// Return the string representation of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    /// All tiers in ascending rank order.
    pub fn all() -> &'static [PartnerTier] {
        &[Self::Bronze, Self::Silver, Self::Gold, Self::Platinum]
    }
}

impl std::fmt::Display for PartnerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PartnerTier {
    type Err = UnitrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            other => Err(UnitrackError::Validation(format!(
                "unknown partner tier {other:?} (expected bronze, silver, gold, or platinum)"
            ))),
        }
    }
}
