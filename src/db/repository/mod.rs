//! Record store — entity-scoped operations over the named collections.
//!
//! Every operation is a complete read-modify-write against the backend:
//! load the collection, change it, replace it. Callers re-read snapshots
//! after a mutation.

mod appointment;
mod patient;
mod professional;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Patient;

pub use appointment::*;
pub use patient::*;
pub use professional::*;

/// Counts of records removed by one delete operation, cascades included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    pub professionals_removed: usize,
    pub patients_removed: usize,
    pub appointments_removed: usize,
}

/// New ids are `<prefix>-<uuid v4>`; they are never reused.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Ids of the patients owned by any of the given professionals, in storage order.
///
/// This is the first half of a professional delete; the second half is
/// [`delete_patients`] on the returned ids.
pub fn patient_ids_for_professionals(patients: &[Patient], professional_ids: &[String]) -> Vec<String> {
    let owners: HashSet<&str> = professional_ids.iter().map(String::as_str).collect();
    patients
        .iter()
        .filter(|p| owners.contains(p.professional_id.as_str()))
        .map(|p| p.id.clone())
        .collect()
}
