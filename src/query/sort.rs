//! Locale-aware ordering for names, emails and phone numbers.
//!
//! Strings are compared on three levels: letters without accents or case,
//! then accents, then case (lowercase first). The case-insensitive variant
//! stops after the accent level.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::enums::{AppointmentSortKey, PatientSortKey, SortDirection};
use crate::models::{Appointment, Patient};

fn base_letters(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

fn with_accents(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_pattern(s: &str) -> Vec<bool> {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(char::is_uppercase).collect()
}

/// Case-sensitive collation: "a" < "A" < "b".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    locale_compare_ignore_case(a, b).then_with(|| case_pattern(a).cmp(&case_pattern(b)))
}

/// Collation that treats "Alpha" and "alpha" as equal.
pub fn locale_compare_ignore_case(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| with_accents(a).cmp(&with_accents(b)))
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort; equal keys keep their relative order in both directions.
pub fn sort_appointments(appointments: &mut [Appointment], key: AppointmentSortKey, direction: SortDirection) {
    appointments.sort_by(|a, b| {
        let ordering = match key {
            AppointmentSortKey::Time => locale_compare(&a.time, &b.time),
            AppointmentSortKey::PatientName => locale_compare(&a.patient_name, &b.patient_name),
        };
        directed(ordering, direction)
    });
}

pub fn sort_patients(patients: &mut [Patient], key: PatientSortKey, direction: SortDirection) {
    patients.sort_by(|a, b| {
        let ordering = match key {
            PatientSortKey::Name => locale_compare_ignore_case(&a.name, &b.name),
            PatientSortKey::Email => locale_compare_ignore_case(&a.email, &b.email),
            PatientSortKey::Phone => locale_compare_ignore_case(&a.phone, &b.phone),
        };
        directed(ordering, direction)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    fn named(name: &str) -> Patient {
        Patient {
            id: name.to_lowercase(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: String::new(),
            professional_id: "prof-1".into(),
        }
    }

    fn names(patients: &[Patient]) -> Vec<&str> {
        patients.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut patients = vec![named("beta"), named("Alpha")];
        sort_patients(&mut patients, PatientSortKey::Name, SortDirection::Ascending);
        assert_eq!(names(&patients), vec!["Alpha", "beta"]);

        sort_patients(&mut patients, PatientSortKey::Name, SortDirection::Descending);
        assert_eq!(names(&patients), vec!["beta", "Alpha"]);
    }

    #[test]
    fn accented_letters_sort_with_their_base() {
        let mut patients = vec![named("Pedro"), named("Élida"), named("Fábio"), named("Eduardo")];
        sort_patients(&mut patients, PatientSortKey::Name, SortDirection::Ascending);
        assert_eq!(names(&patients), vec!["Eduardo", "Élida", "Fábio", "Pedro"]);
    }

    #[test]
    fn case_insensitive_ties_keep_input_order() {
        let mut patients = vec![named("ana"), named("Ana"), named("ANA")];
        sort_patients(&mut patients, PatientSortKey::Name, SortDirection::Ascending);
        assert_eq!(names(&patients), vec!["ana", "Ana", "ANA"]);
        sort_patients(&mut patients, PatientSortKey::Name, SortDirection::Descending);
        assert_eq!(names(&patients), vec!["ana", "Ana", "ANA"]);
    }

    #[test]
    fn patients_sort_by_phone_and_email() {
        let mut patients = fixtures::patients();
        sort_patients(&mut patients, PatientSortKey::Phone, SortDirection::Descending);
        assert_eq!(patients[0].id, "pat-5");
        assert_eq!(patients[4].id, "pat-1");

        sort_patients(&mut patients, PatientSortKey::Email, SortDirection::Ascending);
        let ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pat-1", "pat-4", "pat-2", "pat-3", "pat-5"]);
    }

    #[test]
    fn appointments_sort_by_time() {
        let mut apps = fixtures::appointments();
        sort_appointments(&mut apps, AppointmentSortKey::Time, SortDirection::Ascending);
        let times: Vec<&str> = apps.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "10:00", "11:00", "14:00"]);

        sort_appointments(&mut apps, AppointmentSortKey::Time, SortDirection::Descending);
        assert_eq!(apps[0].time, "14:00");
    }

    #[test]
    fn appointments_sort_by_patient_name() {
        let mut apps = fixtures::appointments();
        sort_appointments(&mut apps, AppointmentSortKey::PatientName, SortDirection::Ascending);
        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["app-1", "app-4", "app-2", "app-3"]);
    }

    #[test]
    fn case_sensitive_compare_puts_lowercase_first() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("A", "b"), Ordering::Less);
        assert_eq!(locale_compare_ignore_case("a", "A"), Ordering::Equal);
        assert_eq!(locale_compare("e", "é"), Ordering::Less);
    }
}
