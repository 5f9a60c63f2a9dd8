//! Text search and date-range filters over snapshots.
//!
//! A blank (whitespace-only) search term matches everything. Otherwise the
//! term is lowercased as typed and matched as a substring.

use crate::models::{Appointment, AppointmentFilter, Patient, PatientFilter};

fn normalized_term(term: &str) -> Option<String> {
    if term.trim().is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

fn matches_needle(appointment: &Appointment, needle: Option<&str>) -> bool {
    needle.map_or(true, |needle| {
        appointment.patient_name.to_lowercase().contains(needle)
            || appointment.notes.to_lowercase().contains(needle)
    })
}

/// Case-insensitive substring match on patient name or notes.
pub fn appointment_matches(appointment: &Appointment, term: &str) -> bool {
    matches_needle(appointment, normalized_term(term).as_deref())
}

pub fn search_appointments(appointments: &[Appointment], term: &str) -> Vec<Appointment> {
    let needle = normalized_term(term);
    appointments
        .iter()
        .filter(|a| matches_needle(a, needle.as_deref()))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on the patient name only.
pub fn search_patients(patients: &[Patient], term: &str) -> Vec<Patient> {
    let Some(needle) = normalized_term(term) else {
        return patients.to_vec();
    };
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Inclusive range on ISO `YYYY-MM-DD` dates, compared as strings.
/// An unset or empty bound is open.
pub fn in_date_range(date: &str, from: Option<&str>, to: Option<&str>) -> bool {
    let from = from.filter(|d| !d.is_empty());
    let to = to.filter(|d| !d.is_empty());
    from.map_or(true, |start| date >= start) && to.map_or(true, |end| date <= end)
}

pub fn filter_by_date_range(
    appointments: &[Appointment],
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| in_date_range(&a.date, from, to))
        .cloned()
        .collect()
}

/// Search term and date range together.
pub fn filter_appointments(appointments: &[Appointment], filter: &AppointmentFilter) -> Vec<Appointment> {
    let needle = normalized_term(&filter.search);
    appointments
        .iter()
        .filter(|a| matches_needle(a, needle.as_deref()))
        .filter(|a| in_date_range(&a.date, filter.date_from.as_deref(), filter.date_to.as_deref()))
        .cloned()
        .collect()
}

pub fn filter_patients(patients: &[Patient], filter: &PatientFilter) -> Vec<Patient> {
    search_patients(patients, &filter.search)
}
