//! # In-Memory Store
//!
//! Thread-safe, cloneable record store. Clones share the same underlying
//! collections. Collections are `BTreeMap`s keyed by record id, so listings
//! come back in a stable order and snapshots serialize deterministically.
//!
//! Locks are `parking_lot::RwLock`: non-poisoning, and never held across a
//! call back into caller code.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use unitrack_core::{
    Application, ApplicationId, CommissionId, Partner, PartnerId, Student, StudentId,
};
use unitrack_state::Commission;

use crate::traits::RecordStore;

#[derive(Debug, Default)]
struct Collections {
    partners: BTreeMap<PartnerId, Partner>,
    students: BTreeMap<StudentId, Student>,
    applications: BTreeMap<ApplicationId, Application>,
    commissions: BTreeMap<CommissionId, Commission>,
}

/// Shared in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a student.
    pub fn save_student(&self, student: Student) {
        self.data.write().students.insert(student.id.clone(), student);
    }

    /// Insert or replace an application.
    pub fn save_application(&self, application: Application) {
        self.data
            .write()
            .applications
            .insert(application.id.clone(), application);
    }

    /// Apply `f` to a stored commission under the write lock.
    ///
    /// Returns `None` if no commission has this id, otherwise the closure's
    /// result. The record is only written back when the closure succeeds.
    pub fn try_update_commission<R, E>(
        &self,
        id: &CommissionId,
        f: impl FnOnce(&mut Commission) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        let mut guard = self.data.write();
        let current = guard.commissions.get(id)?;
        let mut working = current.clone();
        let result = f(&mut working);
        if result.is_ok() {
            guard.commissions.insert(*id, working);
        }
        Some(result)
    }

    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        let d = self.data.read();
        d.partners.len() + d.students.len() + d.applications.len() + d.commissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for InMemoryStore {
    fn partners(&self) -> Vec<Partner> {
        self.data.read().partners.values().cloned().collect()
    }

    fn students(&self) -> Vec<Student> {
        self.data.read().students.values().cloned().collect()
    }

    fn applications(&self) -> Vec<Application> {
        self.data.read().applications.values().cloned().collect()
    }

    fn commissions(&self) -> Vec<Commission> {
        self.data.read().commissions.values().cloned().collect()
    }

    fn save_partner(&self, partner: Partner) {
        tracing::debug!(partner = %partner.id, tier = ?partner.tier, "saving partner");
        self.data.write().partners.insert(partner.id.clone(), partner);
    }

    fn save_commission(&self, commission: Commission) {
        tracing::debug!(
            commission = %commission.id,
            status = %commission.status,
            "saving commission"
        );
        self.data.write().commissions.insert(commission.id, commission);
    }

    fn find_partner(&self, id: &PartnerId) -> Option<Partner> {
        self.data.read().partners.get(id).cloned()
    }

    fn find_student(&self, id: &StudentId) -> Option<Student> {
        self.data.read().students.get(id).cloned()
    }

    fn find_application(&self, id: &ApplicationId) -> Option<Application> {
        self.data.read().applications.get(id).cloned()
    }

    fn find_commission(&self, id: &CommissionId) -> Option<Commission> {
        self.data.read().commissions.get(id).cloned()
    }
}
