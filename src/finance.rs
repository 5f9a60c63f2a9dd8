//! Revenue split between the clinic and a professional.

use serde::{Deserialize, Serialize};

use crate::models::Appointment;

/// Defaults shown on the administrator's financial screen.
pub const DEFAULT_TOTAL_BILLED: f64 = 10_000.0;
pub const DEFAULT_CLINIC_PERCENTAGE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSplit {
    pub total_billed: f64,
    pub clinic_percentage: f64,
    pub clinic_share: f64,
    pub professional_share: f64,
}

/// `clinic_share = total * percentage / 100`; the professional keeps the rest.
/// Inputs are taken as given, without clamping.
pub fn compute_split(total_billed: f64, clinic_percentage: f64) -> RevenueSplit {
    let clinic_share = (total_billed * clinic_percentage) / 100.0;
    RevenueSplit {
        total_billed,
        clinic_percentage,
        clinic_share,
        professional_share: total_billed - clinic_share,
    }
}

/// Sum of session values, used to prefill the billed total.
pub fn total_session_value(appointments: &[Appointment]) -> f64 {
    appointments.iter().map(|a| a.session_value).sum()
}

/// Brazilian real formatting: `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}
