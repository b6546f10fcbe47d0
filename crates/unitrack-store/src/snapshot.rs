//! # JSON Snapshot
//!
//! The whole record set as one JSON document:
//!
//! ```json
//! { "partners": [...], "students": [...], "applications": [...], "commissions": [...] }
//! ```
//!
//! Any collection may be omitted. A snapshot path that does not exist yet
//! loads as an empty snapshot, so a fresh data file needs no bootstrapping.
//! Writes go to a sibling temp file first and are renamed into place.

use std::path::Path;

use serde::{Deserialize, Serialize};

use unitrack_core::{Application, Partner, Student};
use unitrack_state::Commission;

use crate::error::StoreError;
use crate::memory::InMemoryStore;
use crate::traits::RecordStore;

/// Serialized form of every stored collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub commissions: Vec<Commission>,
}

impl Snapshot {
    /// Read a snapshot from `path`. A missing file yields an empty snapshot.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "snapshot not found; starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            partners = snapshot.partners.len(),
            students = snapshot.students.len(),
            applications = snapshot.applications.len(),
            commissions = snapshot.commissions.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "wrote snapshot");
        Ok(())
    }

    /// Capture the current contents of a store.
    pub fn from_store(store: &impl RecordStore) -> Self {
        Self {
            partners: store.partners(),
            students: store.students(),
            applications: store.applications(),
            commissions: store.commissions(),
        }
    }

    /// Populate a fresh in-memory store. Later duplicates of an id win.
    pub fn into_store(self) -> InMemoryStore {
        let store = InMemoryStore::new();
        for p in self.partners {
            store.save_partner(p);
        }
        for s in self.students {
            store.save_student(s);
        }
        for a in self.applications {
            store.save_application(a);
        }
        for c in self.commissions {
            store.save_commission(c);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitrack_core::{PartnerTier, Timestamp};
    use unitrack_state::CommissionTerms;

    fn populated() -> Snapshot {
        Snapshot {
            partners: vec![Partner::new("p1", "Alpha").with_tier(PartnerTier::Gold)],
            students: vec![Student::new("s1", "Amina").with_nationality("Sudan")],
            applications: vec![Application::new(
                "a1",
                "s1",
                "p1",
                "university_of_malaya",
                "Medicine",
                180000.0,
                "enrollment_completed",
            )],
            commissions: vec![Commission::new_pending(
                CommissionTerms {
                    application_id: "a1".into(),
                    student_id: "s1".into(),
                    partner_id: "p1".into(),
                    university_id: "university_of_malaya".into(),
                    program_name: "Medicine".to_string(),
                    tuition_fee: 180000.0,
                    commission_rate: 0.2,
                    commission_amount: 35280.0,
                    currency: "USD".to_string(),
                },
                Timestamp::parse("2026-09-01T00:00:00Z").unwrap(),
            )],
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snap = Snapshot::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unitrack.json");
        let snap = populated();
        snap.save(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(Snapshot::load(&path).unwrap(), snap);
    }

    #[test]
    fn partial_document_defaults_missing_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"partners":[{"id":"p9","name":"Solo"}]}"#).unwrap();
        let snap = Snapshot::load(&path).unwrap();
        assert_eq!(snap.partners.len(), 1);
        assert!(snap.applications.is_empty());
        assert!(snap.commissions.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn store_round_trip() {
        let snap = populated();
        let store = snap.clone().into_store();
        assert_eq!(Snapshot::from_store(&store), snap);
    }

    #[test]
    fn browser_timestamps_load_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.json");
        std::fs::write(
            &path,
            r#"{"applications":[{
                "id":"a1","studentId":"s1","partnerId":"p1",
                "universityId":"u","programName":"Law","tuitionFee":1000,
                "status":"offer_received","createdAt":"2026-09-01T08:00:00.123+08:00"
            }]}"#,
        )
        .unwrap();
        let snap = Snapshot::load(&path).unwrap();
        assert_eq!(
            snap.applications[0].created_at,
            Some(Timestamp::parse("2026-09-01T00:00:00Z").unwrap())
        );
    }
}
