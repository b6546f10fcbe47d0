//! # Stored Records
//!
//! Partner, student, and application records in the shape the dashboards
//! persist them: camelCase keys, optional fields omitted when absent.

use serde::{Deserialize, Serialize};

use crate::identity::{ApplicationId, PartnerId, StudentId, UniversityId};
use crate::status::ApplicationStatus;
use crate::temporal::Timestamp;
use crate::tier::PartnerTier;

/// Currency assumed for applications stored without one.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A recruitment partner (agency) submitting applications for students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Current classification. Unset until the first tier update runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<PartnerTier>,
}

impl Partner {
    pub fn new(id: impl Into<PartnerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            tier: None,
        }
    }

    pub fn with_tier(mut self, tier: PartnerTier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// A student on whose behalf applications are made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Free-text nationality as entered, e.g. `Sudan`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<PartnerId>,
}

impl Student {
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nationality: None,
            partner_id: None,
        }
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }
}

/// A university application submitted by a partner for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub partner_id: PartnerId,
    pub university_id: UniversityId,
    pub program_name: String,
    pub tuition_fee: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Application {
    /// Create an application record with the default currency and no
    /// creation timestamp.
    pub fn new(
        id: impl Into<ApplicationId>,
        student_id: impl Into<StudentId>,
        partner_id: impl Into<PartnerId>,
        university_id: impl Into<UniversityId>,
        program_name: impl Into<String>,
        tuition_fee: f64,
        status: impl Into<ApplicationStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            partner_id: partner_id.into(),
            university_id: university_id.into(),
            program_name: program_name.into(),
            tuition_fee,
            currency: default_currency(),
            status: status.into(),
            created_at: None,
        }
    }
}
