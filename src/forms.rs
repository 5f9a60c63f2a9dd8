//! Form adapter — raw input strings to typed store inputs.
//!
//! The record store does not look at field content. Required-field checks,
//! date/time shape checks and numeric coercion of the session value all
//! happen here, before anything reaches the store.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time format (expected HH:MM): {0}")]
    InvalidTime(String),
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

/// Parse a currency amount typed by the user.
///
/// Blank, non-numeric, non-finite and negative input all become 0.
pub fn coerce_session_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn check_date(date: &str) -> Result<(), FormError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| FormError::InvalidDate(date.to_string()))
}

fn check_time(time: &str) -> Result<(), FormError> {
    // "9:00" parses with %H but does not sort with "10:00"; insist on two digits.
    if time.len() != 5 {
        return Err(FormError::InvalidTime(time.to_string()));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| FormError::InvalidTime(time.to_string()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalForm {
    pub name: String,
    pub specialty: String,
}

impl ProfessionalForm {
    pub fn into_new(self) -> Result<NewProfessional, FormError> {
        require(&self.name, "Name")?;
        require(&self.specialty, "Specialty")?;
        Ok(NewProfessional {
            name: self.name,
            specialty: self.specialty,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl PatientForm {
    /// The owning professional is the one logged in, not a form field.
    pub fn into_new(self, professional_id: &str) -> Result<NewPatient, FormError> {
        require(&self.name, "Name")?;
        Ok(NewPatient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            professional_id: professional_id.to_string(),
        })
    }

    /// Overlay the form onto an existing patient, keeping its id and owner.
    pub fn apply_to(self, existing: &Patient) -> Result<Patient, FormError> {
        require(&self.name, "Name")?;
        Ok(Patient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            ..existing.clone()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub session_value: String,
}

impl AppointmentForm {
    /// A blank form for `today`, preselecting the first patient in the list.
    pub fn blank(today: NaiveDate, patients: &[Patient]) -> Self {
        Self {
            patient_id: patients.first().map(|p| p.id.clone()).unwrap_or_default(),
            date: today.format("%Y-%m-%d").to_string(),
            time: "09:00".into(),
            notes: String::new(),
            session_value: "0".into(),
        }
    }

    /// Prefill from a stored appointment for editing.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            patient_id: appointment.patient_id.clone(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            notes: appointment.notes.clone(),
            session_value: appointment.session_value.to_string(),
        }
    }

    fn validate(&self) -> Result<f64, FormError> {
        require(&self.patient_id, "Patient")?;
        check_date(&self.date)?;
        check_time(&self.time)?;
        Ok(coerce_session_value(&self.session_value))
    }

    pub fn into_new(self, professional_id: &str) -> Result<NewAppointment, FormError> {
        let session_value = self.validate()?;
        Ok(NewAppointment {
            patient_id: self.patient_id,
            professional_id: professional_id.to_string(),
            date: self.date,
            time: self.time,
            notes: self.notes,
            session_value,
        })
    }

    /// Overlay the form onto an existing appointment. The patient name is
    /// left as stored; the store refreshes it on update.
    pub fn apply_to(self, existing: &Appointment) -> Result<Appointment, FormError> {
        let session_value = self.validate()?;
        Ok(Appointment {
            patient_id: self.patient_id,
            date: self.date,
            time: self.time,
            notes: self.notes,
            session_value,
            ..existing.clone()
        })
    }
}
