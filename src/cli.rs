//! Command-line surface over the record store and query engine.
//!
//! Every command opens the store, applies at most one mutation and prints
//! the resulting record or snapshot as JSON on stdout.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config;
use crate::db::{self, CollectionBackend, SqliteCollections};
use crate::finance;
use crate::forms::{AppointmentForm, PatientForm, ProfessionalForm};
use crate::models::enums::{AppointmentSortKey, PatientSortKey, SortDirection, UserRole};
use crate::models::{AppointmentFilter, PatientFilter};
use crate::query::{self, AppointmentSort, PatientSelection, PatientSort};
use crate::session;

#[derive(Parser, Debug)]
#[command(name = "clinica", version, about = "Clinic scheduling: professionals, patients and appointments")]
pub struct Cli {
    /// Directory holding the clinic database
    #[arg(long, global = true, env = config::DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the professional roster
    #[command(subcommand)]
    Professionals(ProfessionalCommand),
    /// Manage a professional's patients
    #[command(subcommand)]
    Patients(PatientCommand),
    /// Manage a professional's agenda
    #[command(subcommand)]
    Appointments(AppointmentCommand),
    /// Compute the clinic / professional revenue split
    Split(SplitArgs),
    /// Resolve a role selection
    Login {
        #[arg(long)]
        role: UserRole,
        #[arg(long)]
        professional: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfessionalCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Remove a professional with all of their patients and appointments
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    List {
        #[arg(long)]
        professional: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "name")]
        sort: PatientSortKey,
        #[arg(long, default_value = "asc")]
        direction: SortDirection,
    },
    Add {
        #[arg(long)]
        professional: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove patients and their appointments
    Remove(RemovePatientsArgs),
}

#[derive(Args, Debug)]
pub struct RemovePatientsArgs {
    /// Patient ids to remove
    pub ids: Vec<String>,
    /// Also select every patient of this professional matching `--matching`
    #[arg(long, requires = "matching")]
    pub professional: Option<String>,
    #[arg(long)]
    pub matching: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommand {
    List {
        #[arg(long)]
        professional: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value = "time")]
        sort: AppointmentSortKey,
        #[arg(long, default_value = "asc")]
        direction: SortDirection,
    },
    Add {
        #[arg(long)]
        professional: String,
        #[arg(long)]
        patient: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "")]
        value: String,
    },
    Update {
        id: String,
        #[arg(long)]
        patient: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Billed total; defaults to the professional's session values, or 10000
    #[arg(long)]
    pub total: Option<f64>,
    #[arg(long)]
    pub professional: Option<String>,
    #[arg(long, default_value_t = finance::DEFAULT_CLINIC_PERCENTAGE)]
    pub percentage: f64,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

fn not_found(entity: &str, id: &str) -> String {
    format!("Entity not found: {entity} with id {id}")
}

/// Open the store under `data_dir` and seed any collection that was never written.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<SqliteCollections, String> {
    let dir = data_dir.unwrap_or_else(config::app_data_dir);
    std::fs::create_dir_all(&dir).map_err(|e| format!("Cannot create {}: {e}", dir.display()))?;
    let store = SqliteCollections::open(&config::database_path(&dir)).map_err(|e| e.to_string())?;
    db::ensure_seeded(&store).map_err(|e| e.to_string())?;
    Ok(store)
}

pub fn execute(cli: Cli) -> Result<(), String> {
    let store = open_store(cli.data_dir)?;
    match cli.command {
        Command::Professionals(cmd) => professionals(&store, cmd),
        Command::Patients(cmd) => patients(&store, cmd),
        Command::Appointments(cmd) => appointments(&store, cmd),
        Command::Split(args) => split(&store, args),
        Command::Login { role, professional } => {
            let user = session::login(&store, role, professional.as_deref()).map_err(|e| e.to_string())?;
            print_json(&user)
        }
    }
}

fn professionals(store: &dyn CollectionBackend, cmd: ProfessionalCommand) -> Result<(), String> {
    match cmd {
        ProfessionalCommand::List => {
            print_json(&db::get_professionals(store).map_err(|e| e.to_string())?)
        }
        ProfessionalCommand::Add { name, specialty } => {
            let new = ProfessionalForm { name, specialty }.into_new().map_err(|e| e.to_string())?;
            print_json(&db::add_professional(store, &new).map_err(|e| e.to_string())?)
        }
        ProfessionalCommand::Update { id, name, specialty } => {
            let existing = db::get_professional(store, &id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("professional", &id))?;
            let form = ProfessionalForm {
                name: name.unwrap_or(existing.name),
                specialty: specialty.unwrap_or(existing.specialty),
            };
            let new = form.into_new().map_err(|e| e.to_string())?;
            let updated = crate::models::Professional { id, name: new.name, specialty: new.specialty };
            db::update_professional(store, &updated).map_err(|e| e.to_string())?;
            print_json(&updated)
        }
        ProfessionalCommand::Remove { id } => {
            print_json(&db::delete_professional(store, &id).map_err(|e| e.to_string())?)
        }
    }
}

fn patients(store: &dyn CollectionBackend, cmd: PatientCommand) -> Result<(), String> {
    match cmd {
        PatientCommand::List { professional, search, sort, direction } => {
            let mine = db::get_patients_by_professional(store, &professional).map_err(|e| e.to_string())?;
            let view = query::patient_view(&mine, &PatientFilter { search }, PatientSort { key: sort, direction });
            print_json(&view)
        }
        PatientCommand::Add { professional, name, email, phone } => {
            let new = PatientForm { name, email, phone }
                .into_new(&professional)
                .map_err(|e| e.to_string())?;
            print_json(&db::add_patient(store, &new).map_err(|e| e.to_string())?)
        }
        PatientCommand::Update { id, name, email, phone } => {
            let existing = db::get_patient(store, &id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("patient", &id))?;
            let form = PatientForm {
                name: name.unwrap_or_else(|| existing.name.clone()),
                email: email.unwrap_or_else(|| existing.email.clone()),
                phone: phone.unwrap_or_else(|| existing.phone.clone()),
            };
            let updated = form.apply_to(&existing).map_err(|e| e.to_string())?;
            db::update_patient(store, &updated).map_err(|e| e.to_string())?;
            print_json(&updated)
        }
        PatientCommand::Remove(args) => {
            let mut selection = PatientSelection::new();
            for id in &args.ids {
                selection.toggle(id);
            }
            if let (Some(professional), Some(term)) = (args.professional, args.matching) {
                let mine = db::get_patients_by_professional(store, &professional).map_err(|e| e.to_string())?;
                let visible = query::search_patients(&mine, &term);
                selection.select_all_visible(&query::visible_ids(&visible));
            }
            let summary = db::delete_patients(store, &selection.ids()).map_err(|e| e.to_string())?;
            print_json(&summary)
        }
    }
}

fn appointments(store: &dyn CollectionBackend, cmd: AppointmentCommand) -> Result<(), String> {
    match cmd {
        AppointmentCommand::List { professional, search, from, to, sort, direction } => {
            let mine = db::get_appointments_by_professional(store, &professional).map_err(|e| e.to_string())?;
            let filter = AppointmentFilter { search, date_from: from, date_to: to };
            let view = query::schedule_view(&mine, &filter, AppointmentSort { key: sort, direction });
            print_json(&view)
        }
        AppointmentCommand::Add { professional, patient, date, time, notes, value } => {
            let patients = db::get_patients_by_professional(store, &professional).map_err(|e| e.to_string())?;
            let mut form = AppointmentForm::blank(Utc::now().date_naive(), &patients);
            if let Some(patient) = patient {
                form.patient_id = patient;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(time) = time {
                form.time = time;
            }
            form.notes = notes;
            form.session_value = value;
            let new = form.into_new(&professional).map_err(|e| e.to_string())?;
            print_json(&db::add_appointment(store, &new).map_err(|e| e.to_string())?)
        }
        AppointmentCommand::Update { id, patient, date, time, notes, value } => {
            let existing = db::get_appointment(store, &id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("appointment", &id))?;
            let mut form = AppointmentForm::from_appointment(&existing);
            if let Some(patient) = patient {
                form.patient_id = patient;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(time) = time {
                form.time = time;
            }
            if let Some(notes) = notes {
                form.notes = notes;
            }
            if let Some(value) = value {
                form.session_value = value;
            }
            let updated = form.apply_to(&existing).map_err(|e| e.to_string())?;
            db::update_appointment(store, &updated).map_err(|e| e.to_string())?;
            let stored = db::get_appointment(store, &id).map_err(|e| e.to_string())?;
            print_json(&stored)
        }
        AppointmentCommand::Remove { id } => {
            let removed = db::delete_appointment(store, &id).map_err(|e| e.to_string())?;
            print_json(&serde_json::json!({ "removed": removed }))
        }
    }
}

fn split(store: &dyn CollectionBackend, args: SplitArgs) -> Result<(), String> {
    let total = match (args.total, args.professional) {
        (Some(total), _) => total,
        (None, Some(professional)) => {
            let agenda = db::get_appointments_by_professional(store, &professional).map_err(|e| e.to_string())?;
            finance::total_session_value(&agenda)
        }
        (None, None) => finance::DEFAULT_TOTAL_BILLED,
    };
    let result = finance::compute_split(total, args.percentage);
    print_json(&serde_json::json!({
        "split": result,
        "clinicShareFormatted": finance::format_brl(result.clinic_share),
        "professionalShareFormatted": finance::format_brl(result.professional_share),
    }))
}
