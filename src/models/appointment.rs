use serde::{Deserialize, Serialize};

/// A scheduled session between a professional and one of their patients.
///
/// `patient_name` is a copy of the patient's name taken the last time this
/// appointment was written. Renaming the patient does not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub professional_id: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM
    pub notes: String,
    #[serde(default)]
    pub session_value: f64,
}

/// Fields for an appointment that has not been stored yet.
/// The patient name is resolved by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: String,
    pub professional_id: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    #[serde(default)]
    pub session_value: f64,
}
