//! # Error Types
//!
//! Two failure families: configuration that cannot be loaded or breaks its
//! invariants, and engine operations whose referenced records are missing.
//! Missing override entries (university, program, country) and a missing
//! student are not errors; the cascade simply skips that step.

use std::path::PathBuf;

use thiserror::Error;

use unitrack_core::{ApplicationId, CommissionId, PartnerId};

/// Errors loading or validating a [`CommissionConfig`](crate::CommissionConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read commission config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse failure.
    #[error("invalid YAML commission config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse failure.
    #[error("invalid JSON commission config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported commission config format {path} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// The configuration parsed but violates its invariants.
    #[error("commission config is invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Errors from store-backed engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The application references a partner that is not stored.
    ///
    /// Not retryable until the referential data is fixed.
    #[error("partner {partner_id} not found")]
    PartnerNotFound { partner_id: PartnerId },

    /// No stored application has this id.
    #[error("application {application_id} not found")]
    ApplicationNotFound { application_id: ApplicationId },

    /// The application has not reached enrollment completion.
    #[error("application {application_id} is in status {status}, not enrollment_completed")]
    NotEnrolled {
        application_id: ApplicationId,
        status: String,
    },

    /// A commission was already minted for this application.
    #[error("application {application_id} already has commission {commission_id}")]
    CommissionAlreadyExists {
        application_id: ApplicationId,
        commission_id: CommissionId,
    },
}
