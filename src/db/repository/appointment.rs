use std::collections::HashSet;

use crate::db::{load_collection, save_collection, CollectionBackend, DatabaseError};
use crate::models::enums::CollectionName;
use crate::models::*;

use super::{generate_id, get_patient};

pub fn get_appointments(backend: &dyn CollectionBackend) -> Result<Vec<Appointment>, DatabaseError> {
    load_collection(backend, CollectionName::Appointments)
}

pub fn get_appointment(
    backend: &dyn CollectionBackend,
    id: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    Ok(get_appointments(backend)?.into_iter().find(|a| a.id == id))
}

/// Appointments whose own `professional_id` matches.
pub fn get_appointments_by_professional(
    backend: &dyn CollectionBackend,
    professional_id: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    Ok(get_appointments(backend)?
        .into_iter()
        .filter(|a| a.professional_id == professional_id)
        .collect())
}

fn resolve_patient(backend: &dyn CollectionBackend, patient_id: &str) -> Result<Patient, DatabaseError> {
    let patient = get_patient(backend, patient_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patient".into(),
        id: patient_id.to_string(),
    })?;
    Ok(patient)
}

fn warn_on_owner_mismatch(patient: &Patient, professional_id: &str) {
    if patient.professional_id != professional_id {
        tracing::warn!(
            patient_id = %patient.id,
            patient_professional = %patient.professional_id,
            appointment_professional = %professional_id,
            "Appointment professional differs from the patient's professional"
        );
    }
}

/// Add an appointment for an existing patient, copying the patient's
/// current name. Fails with `NotFound` and writes nothing otherwise.
pub fn add_appointment(
    backend: &dyn CollectionBackend,
    appointment: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    let patient = resolve_patient(backend, &appointment.patient_id)?;
    warn_on_owner_mismatch(&patient, &appointment.professional_id);

    let mut appointments = get_appointments(backend)?;
    let created = Appointment {
        id: generate_id("app"),
        patient_id: appointment.patient_id.clone(),
        patient_name: patient.name,
        professional_id: appointment.professional_id.clone(),
        date: appointment.date.clone(),
        time: appointment.time.clone(),
        notes: appointment.notes.clone(),
        session_value: appointment.session_value,
    };
    appointments.push(created.clone());
    save_collection(backend, CollectionName::Appointments, &appointments)?;
    tracing::debug!(id = %created.id, patient_id = %created.patient_id, "Appointment added");
    Ok(created)
}

/// Replace the stored appointment with the same id, refreshing
/// `patient_name` from the referenced patient.
///
/// A missing patient is an error even when the appointment id is unknown;
/// an unknown appointment id with a valid patient is a no-op returning `false`.
pub fn update_appointment(
    backend: &dyn CollectionBackend,
    updated: &Appointment,
) -> Result<bool, DatabaseError> {
    let patient = resolve_patient(backend, &updated.patient_id)?;
    warn_on_owner_mismatch(&patient, &updated.professional_id);

    let mut appointments = get_appointments(backend)?;
    let Some(slot) = appointments.iter_mut().find(|a| a.id == updated.id) else {
        tracing::warn!(id = %updated.id, "Ignoring update of unknown appointment");
        return Ok(false);
    };
    *slot = Appointment {
        patient_name: patient.name,
        ..updated.clone()
    };
    save_collection(backend, CollectionName::Appointments, &appointments)?;
    Ok(true)
}

/// Returns the number of appointments removed.
pub fn delete_appointments(backend: &dyn CollectionBackend, ids: &[String]) -> Result<usize, DatabaseError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let appointments = get_appointments(backend)?;
    let before = appointments.len();
    let remaining: Vec<Appointment> = appointments
        .into_iter()
        .filter(|a| !doomed.contains(a.id.as_str()))
        .collect();
    save_collection(backend, CollectionName::Appointments, &remaining)?;
    Ok(before - remaining.len())
}

pub fn delete_appointment(backend: &dyn CollectionBackend, id: &str) -> Result<usize, DatabaseError> {
    delete_appointments(backend, &[id.to_string()])
}
