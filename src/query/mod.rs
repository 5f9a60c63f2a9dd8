//! Query engine — stateless views over store snapshots.
//!
//! Nothing here touches storage. Inputs are snapshots returned by the record
//! store; outputs are new vectors. Only [`PatientSelection`] carries state
//! between calls.

pub mod search;
pub mod selection;
pub mod sort;

pub use search::*;
pub use selection::*;
pub use sort::*;

use crate::models::enums::{AppointmentSortKey, PatientSortKey, SortDirection};
use crate::models::{Appointment, AppointmentFilter, Patient, PatientFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentSort {
    pub key: AppointmentSortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatientSort {
    pub key: PatientSortKey,
    pub direction: SortDirection,
}

/// Filtered then sorted agenda. The default sort is by time, ascending.
pub fn schedule_view(
    appointments: &[Appointment],
    filter: &AppointmentFilter,
    sort: AppointmentSort,
) -> Vec<Appointment> {
    let mut view = filter_appointments(appointments, filter);
    sort_appointments(&mut view, sort.key, sort.direction);
    view
}

pub fn patient_view(patients: &[Patient], filter: &PatientFilter, sort: PatientSort) -> Vec<Patient> {
    let mut view = filter_patients(patients, filter);
    sort_patients(&mut view, sort.key, sort.direction);
    view
}

/// Ids of a rendered patient list, for the selection operations.
pub fn visible_ids(patients: &[Patient]) -> Vec<String> {
    patients.iter().map(|p| p.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, ensure_seeded, MemoryCollections};

    #[test]
    fn schedule_view_filters_and_orders() {
        let backend = MemoryCollections::new();
        ensure_seeded(&backend).unwrap();
        let apps = db::get_appointments(&backend).unwrap();

        let view = schedule_view(&apps, &AppointmentFilter::default(), AppointmentSort::default());
        let times: Vec<&str> = view.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "10:00", "11:00", "14:00"]);

        let filter = AppointmentFilter { search: "consulta".into(), ..Default::default() };
        let sort = AppointmentSort { key: AppointmentSortKey::Time, direction: SortDirection::Descending };
        let view = schedule_view(&apps, &filter, sort);
        let ids: Vec<&str> = view.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["app-3", "app-1"]);
    }

    #[test]
    fn selection_persists_across_filter_changes_on_real_view() {
        let backend = MemoryCollections::new();
        ensure_seeded(&backend).unwrap();
        let patients = db::get_patients_by_professional(&backend, "prof-1").unwrap();
        let mut selection = PatientSelection::new();

        let all = patient_view(&patients, &PatientFilter::default(), PatientSort::default());
        assert_eq!(visible_ids(&all), vec!["pat-1", "pat-2"]);
        selection.toggle("pat-1");

        let narrowed = patient_view(&patients, &PatientFilter { search: "maria".into() }, PatientSort::default());
        assert_eq!(visible_ids(&narrowed), vec!["pat-2"]);
        selection.toggle_all_visible(&visible_ids(&narrowed));
        selection.toggle_all_visible(&visible_ids(&narrowed));

        assert!(selection.is_selected("pat-1"));
        assert!(!selection.is_selected("pat-2"));

        let widened = patient_view(&patients, &PatientFilter::default(), PatientSort::default());
        assert!(!selection.all_visible_selected(&visible_ids(&widened)));
        assert_eq!(selection.ids(), vec!["pat-1"]);
    }
}
