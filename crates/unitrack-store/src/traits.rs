//! # Store Trait
//!
//! The read/replace surface the engine consumes. Reads return owned
//! snapshots of the collection; there is no atomicity contract between a
//! read and a later save.

use unitrack_core::{
    Application, ApplicationId, CommissionId, Partner, PartnerId, Student, StudentId,
};
use unitrack_state::Commission;

/// Synchronous access to the stored record collections.
pub trait RecordStore {
    /// All partner records.
    fn partners(&self) -> Vec<Partner>;

    /// All student records.
    fn students(&self) -> Vec<Student>;

    /// All application records.
    fn applications(&self) -> Vec<Application>;

    /// All commission records.
    fn commissions(&self) -> Vec<Commission>;

    /// Insert or replace a partner by id.
    fn save_partner(&self, partner: Partner);

    /// Insert or replace a commission by id.
    fn save_commission(&self, commission: Commission);

    fn find_partner(&self, id: &PartnerId) -> Option<Partner> {
        self.partners().into_iter().find(|p| &p.id == id)
    }

    fn find_student(&self, id: &StudentId) -> Option<Student> {
        self.students().into_iter().find(|s| &s.id == id)
    }

    fn find_application(&self, id: &ApplicationId) -> Option<Application> {
        self.applications().into_iter().find(|a| &a.id == id)
    }

    fn find_commission(&self, id: &CommissionId) -> Option<Commission> {
        self.commissions().into_iter().find(|c| &c.id == id)
    }

    /// Applications submitted by one partner.
    fn applications_for_partner(&self, partner_id: &PartnerId) -> Vec<Application> {
        self.applications()
            .into_iter()
            .filter(|a| &a.partner_id == partner_id)
            .collect()
    }

    /// Commissions owed to one partner.
    fn commissions_for_partner(&self, partner_id: &PartnerId) -> Vec<Commission> {
        self.commissions()
            .into_iter()
            .filter(|c| &c.partner_id == partner_id)
            .collect()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn partners(&self) -> Vec<Partner> {
        (**self).partners()
    }

    fn students(&self) -> Vec<Student> {
        (**self).students()
    }

    fn applications(&self) -> Vec<Application> {
        (**self).applications()
    }

    fn commissions(&self) -> Vec<Commission> {
        (**self).commissions()
    }

    fn save_partner(&self, partner: Partner) {
        (**self).save_partner(partner)
    }

    fn save_commission(&self, commission: Commission) {
        (**self).save_commission(commission)
    }

    fn find_partner(&self, id: &PartnerId) -> Option<Partner> {
        (**self).find_partner(id)
    }

    fn find_student(&self, id: &StudentId) -> Option<Student> {
        (**self).find_student(id)
    }

    fn find_application(&self, id: &ApplicationId) -> Option<Application> {
        (**self).find_application(id)
    }

    fn find_commission(&self, id: &CommissionId) -> Option<Commission> {
        (**self).find_commission(id)
    }

    fn applications_for_partner(&self, partner_id: &PartnerId) -> Vec<Application> {
        (**self).applications_for_partner(partner_id)
    }

    fn commissions_for_partner(&self, partner_id: &PartnerId) -> Vec<Commission> {
        (**self).commissions_for_partner(partner_id)
    }
}
