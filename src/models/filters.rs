#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    /// Matched against patient name and notes.
    pub search: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct PatientFilter {
    /// Matched against the patient name.
    pub search: String,
}
