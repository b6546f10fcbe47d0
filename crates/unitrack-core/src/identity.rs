//! # Identity Newtypes
//!
//! Record identifiers are distinct types, so a `StudentId` cannot be passed
//! where a `PartnerId` is expected.
//!
//! Partner, student, application, and university ids arrive from stored
//! records as opaque strings (university ids are slugs such as
//! `university_of_malaya`), so they wrap `String` and serialize as a bare
//! string. Commission ids are minted here and are always UUID v4.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a recruitment partner (agency) record.
    PartnerId
);

string_id!(
    /// Identifier of a student record.
    StudentId
);

string_id!(
    /// Identifier of a university application record.
    ApplicationId
);

string_id!(
    /// Identifier of a university, e.g. `university_of_malaya`.
    ///
    /// Matched exactly against the university override table; no case folding.
    UniversityId
);

/// Identifier of a commission record, generated when the record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionId(Uuid);

impl CommissionId {
    /// Generate a new random commission identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a commission identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CommissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for CommissionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for CommissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
