//! First-run dataset: 3 professionals, 5 patients, 4 appointments.
//!
//! Appointment dates are today's UTC date at seeding time.

use chrono::Utc;

use crate::models::*;

fn professional(id: &str, name: &str, specialty: &str) -> Professional {
    Professional {
        id: id.into(),
        name: name.into(),
        specialty: specialty.into(),
    }
}

fn patient(id: &str, name: &str, phone: &str, email: &str, professional_id: &str) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        professional_id: professional_id.into(),
    }
}

pub fn professionals() -> Vec<Professional> {
    vec![
        professional("prof-1", "Dr. Ana Silva", "Cardiologia"),
        professional("prof-2", "Dr. Bruno Costa", "Dermatologia"),
        professional("prof-3", "Dr. Carla Martins", "Psicologia"),
    ]
}

pub fn patients() -> Vec<Patient> {
    vec![
        patient("pat-1", "João Pereira", "11 98765-4321", "joao.p@example.com", "prof-1"),
        patient("pat-2", "Maria Oliveira", "21 91234-5678", "maria.o@example.com", "prof-1"),
        patient("pat-3", "Pedro Santos", "31 95555-4444", "pedro.s@example.com", "prof-2"),
        patient("pat-4", "Lucia Fernandes", "41 94321-8765", "lucia.f@example.com", "prof-3"),
        patient("pat-5", "Ricardo Alves", "51 98888-7777", "ricardo.a@example.com", "prof-3"),
    ]
}

pub fn appointments() -> Vec<Appointment> {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let appointment = |id: &str, patient_id: &str, patient_name: &str, professional_id: &str, time: &str, notes: &str, value: f64| {
        Appointment {
            id: id.into(),
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            professional_id: professional_id.into(),
            date: today.clone(),
            time: time.into(),
            notes: notes.into(),
            session_value: value,
        }
    };

    vec![
        appointment("app-1", "pat-1", "João Pereira", "prof-1", "09:00", "Consulta de rotina", 200.0),
        appointment("app-2", "pat-2", "Maria Oliveira", "prof-1", "10:00", "Retorno", 150.0),
        appointment("app-3", "pat-3", "Pedro Santos", "prof-2", "14:00", "Primeira consulta", 250.0),
        appointment("app-4", "pat-4", "Lucia Fernandes", "prof-3", "11:00", "Sessão de terapia", 180.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_sizes() {
        assert_eq!(professionals().len(), 3);
        assert_eq!(patients().len(), 5);
        assert_eq!(appointments().len(), 4);
    }

    #[test]
    fn fixture_references_resolve() {
        let profs = professionals();
        let pats = patients();
        for p in &pats {
            assert!(profs.iter().any(|prof| prof.id == p.professional_id), "{} has no professional", p.id);
        }
        for a in appointments() {
            let owner = pats.iter().find(|p| p.id == a.patient_id).unwrap();
            assert_eq!(owner.name, a.patient_name);
            assert_eq!(owner.professional_id, a.professional_id);
        }
    }

    #[test]
    fn fixture_dates_are_iso() {
        for a in appointments() {
            assert!(chrono::NaiveDate::parse_from_str(&a.date, "%Y-%m-%d").is_ok());
        }
    }
}
