//! # Temporal Types — UTC-Only Timestamps
//!
//! Record timestamps (`createdAt`, `updatedAt`, `enrollmentDate`, ...) are
//! stored as ISO8601 strings with a `Z` suffix and whole seconds. `Timestamp`
//! holds that shape by construction: sub-second components are dropped and
//! offsets other than `Z` are converted on the lenient path or rejected on
//! the strict one. Deserialization takes the lenient path, so stored values
//! written with milliseconds or an offset load in the same shape.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UnitrackError;

/// A UTC timestamp truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`UnitrackError::Validation`] if the string is not RFC 3339
    /// or carries an explicit offset (including `+00:00`).
    pub fn parse(s: &str) -> Result<Self, UnitrackError> {
        if !s.ends_with('Z') {
            return Err(UnitrackError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    ///
    /// Used for ingesting dates typed by operators (e.g. an enrollment date
    /// passed on the command line).
    pub fn parse_lenient(s: &str) -> Result<Self, UnitrackError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            UnitrackError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = UnitrackError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_lenient(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
