use crate::db::{load_collection, save_collection, CollectionBackend, DatabaseError};
use crate::models::enums::CollectionName;
use crate::models::*;

use super::{delete_patients, generate_id, patient_ids_for_professionals, CascadeSummary};

pub fn get_professionals(backend: &dyn CollectionBackend) -> Result<Vec<Professional>, DatabaseError> {
    load_collection(backend, CollectionName::Professionals)
}

pub fn get_professional(
    backend: &dyn CollectionBackend,
    id: &str,
) -> Result<Option<Professional>, DatabaseError> {
    Ok(get_professionals(backend)?.into_iter().find(|p| p.id == id))
}

pub fn add_professional(
    backend: &dyn CollectionBackend,
    prof: &NewProfessional,
) -> Result<Professional, DatabaseError> {
    let mut professionals = get_professionals(backend)?;
    let created = Professional {
        id: generate_id("prof"),
        name: prof.name.clone(),
        specialty: prof.specialty.clone(),
    };
    professionals.push(created.clone());
    save_collection(backend, CollectionName::Professionals, &professionals)?;
    tracing::debug!(id = %created.id, "Professional added");
    Ok(created)
}

/// Replace the stored professional with the same id.
///
/// Returns `false` (and writes nothing) when no such professional exists.
pub fn update_professional(
    backend: &dyn CollectionBackend,
    updated: &Professional,
) -> Result<bool, DatabaseError> {
    let mut professionals = get_professionals(backend)?;
    let Some(slot) = professionals.iter_mut().find(|p| p.id == updated.id) else {
        tracing::warn!(id = %updated.id, "Ignoring update of unknown professional");
        return Ok(false);
    };
    *slot = updated.clone();
    save_collection(backend, CollectionName::Professionals, &professionals)?;
    Ok(true)
}

/// Delete professionals together with their patients and those patients'
/// appointments.
///
/// Patients and appointments are removed first, so no stored patient ever
/// references a missing professional.
pub fn delete_professionals(
    backend: &dyn CollectionBackend,
    ids: &[String],
) -> Result<CascadeSummary, DatabaseError> {
    if ids.is_empty() {
        return Ok(CascadeSummary::default());
    }

    let patients = super::get_patients(backend)?;
    let patient_ids = patient_ids_for_professionals(&patients, ids);
    let mut summary = delete_patients(backend, &patient_ids)?;

    let professionals = get_professionals(backend)?;
    let before = professionals.len();
    let remaining: Vec<Professional> = professionals
        .into_iter()
        .filter(|p| !ids.contains(&p.id))
        .collect();
    summary.professionals_removed = before - remaining.len();
    save_collection(backend, CollectionName::Professionals, &remaining)?;

    tracing::info!(
        professionals = summary.professionals_removed,
        patients = summary.patients_removed,
        appointments = summary.appointments_removed,
        "Professionals deleted"
    );
    Ok(summary)
}

pub fn delete_professional(
    backend: &dyn CollectionBackend,
    id: &str,
) -> Result<CascadeSummary, DatabaseError> {
    delete_professionals(backend, &[id.to_string()])
}
