use std::collections::HashSet;

use crate::db::{encode_collection, load_collection, save_collection, CollectionBackend, DatabaseError};
use crate::models::enums::CollectionName;
use crate::models::*;

use super::{generate_id, get_appointments, get_professional, CascadeSummary};

pub fn get_patients(backend: &dyn CollectionBackend) -> Result<Vec<Patient>, DatabaseError> {
    load_collection(backend, CollectionName::Patients)
}

pub fn get_patient(backend: &dyn CollectionBackend, id: &str) -> Result<Option<Patient>, DatabaseError> {
    Ok(get_patients(backend)?.into_iter().find(|p| p.id == id))
}

pub fn get_patients_by_professional(
    backend: &dyn CollectionBackend,
    professional_id: &str,
) -> Result<Vec<Patient>, DatabaseError> {
    Ok(get_patients(backend)?
        .into_iter()
        .filter(|p| p.professional_id == professional_id)
        .collect())
}

/// Add a patient owned by an existing professional.
///
/// The owning professional is checked here only; later updates are not
/// re-validated.
pub fn add_patient(backend: &dyn CollectionBackend, patient: &NewPatient) -> Result<Patient, DatabaseError> {
    if get_professional(backend, &patient.professional_id)?.is_none() {
        return Err(DatabaseError::NotFound {
            entity_type: "professional".into(),
            id: patient.professional_id.clone(),
        });
    }

    let mut patients = get_patients(backend)?;
    let created = Patient {
        id: generate_id("pat"),
        name: patient.name.clone(),
        email: patient.email.clone(),
        phone: patient.phone.clone(),
        professional_id: patient.professional_id.clone(),
    };
    patients.push(created.clone());
    save_collection(backend, CollectionName::Patients, &patients)?;
    tracing::debug!(id = %created.id, professional_id = %created.professional_id, "Patient added");
    Ok(created)
}

/// Replace the stored patient with the same id. Existing appointments keep
/// their copy of the old name until they are next written.
pub fn update_patient(backend: &dyn CollectionBackend, updated: &Patient) -> Result<bool, DatabaseError> {
    let mut patients = get_patients(backend)?;
    let Some(slot) = patients.iter_mut().find(|p| p.id == updated.id) else {
        tracing::warn!(id = %updated.id, "Ignoring update of unknown patient");
        return Ok(false);
    };
    *slot = updated.clone();
    save_collection(backend, CollectionName::Patients, &patients)?;
    Ok(true)
}

/// Delete the given patients and every appointment that references one of them.
///
/// Both collections are replaced in a single backend write.
pub fn delete_patients(
    backend: &dyn CollectionBackend,
    ids: &[String],
) -> Result<CascadeSummary, DatabaseError> {
    if ids.is_empty() {
        return Ok(CascadeSummary::default());
    }
    let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();

    let patients = get_patients(backend)?;
    let patients_before = patients.len();
    let remaining_patients: Vec<Patient> = patients
        .into_iter()
        .filter(|p| !doomed.contains(p.id.as_str()))
        .collect();

    let appointments = get_appointments(backend)?;
    let appointments_before = appointments.len();
    let remaining_appointments: Vec<Appointment> = appointments
        .into_iter()
        .filter(|a| !doomed.contains(a.patient_id.as_str()))
        .collect();

    backend.write_batch(&[
        (CollectionName::Appointments, encode_collection(&remaining_appointments)?),
        (CollectionName::Patients, encode_collection(&remaining_patients)?),
    ])?;

    let summary = CascadeSummary {
        professionals_removed: 0,
        patients_removed: patients_before - remaining_patients.len(),
        appointments_removed: appointments_before - remaining_appointments.len(),
    };
    tracing::debug!(
        patients = summary.patients_removed,
        appointments = summary.appointments_removed,
        "Patients deleted"
    );
    Ok(summary)
}

pub fn delete_patient(backend: &dyn CollectionBackend, id: &str) -> Result<CascadeSummary, DatabaseError> {
    delete_patients(backend, &[id.to_string()])
}
