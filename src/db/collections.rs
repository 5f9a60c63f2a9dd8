//! Persistence backend: named JSON collections.
//!
//! Each record kind lives in one collection, stored as a single JSON array
//! under a fixed key (see [`CollectionName`]). A write always replaces the
//! whole array, so readers never observe a partially written collection.
//!
//! Two backends implement [`CollectionBackend`]:
//! - [`SqliteCollections`] — durable, one row per collection in `collections`.
//! - [`MemoryCollections`] — process-local, used by tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::fixtures;
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::enums::CollectionName;

/// Raw storage of serialized collections.
///
/// Implementations must apply every entry of a `write_batch` call or none of
/// them.
pub trait CollectionBackend {
    /// Returns the stored JSON payload, or `None` if the collection was never written.
    fn read(&self, name: CollectionName) -> Result<Option<String>, DatabaseError>;

    /// Replaces each named collection with its payload.
    fn write_batch(&self, writes: &[(CollectionName, String)]) -> Result<(), DatabaseError>;

    fn write(&self, name: CollectionName, payload: String) -> Result<(), DatabaseError> {
        self.write_batch(&[(name, payload)])
    }
}

// ═══════════════════════════════════════════
// Typed access
// ═══════════════════════════════════════════

/// Load a whole collection in storage order.
///
/// A collection that was never written, or whose payload does not parse as
/// an array of `T`, loads as empty.
pub fn load_collection<T: DeserializeOwned>(
    backend: &dyn CollectionBackend,
    name: CollectionName,
) -> Result<Vec<T>, DatabaseError> {
    let Some(payload) = backend.read(name)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<T>>(&payload) {
        Ok(records) => Ok(records),
        Err(e) => {
            tracing::warn!(collection = %name, error = %e, "Stored collection is malformed, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Replace a whole collection.
pub fn save_collection<T: Serialize>(
    backend: &dyn CollectionBackend,
    name: CollectionName,
    records: &[T],
) -> Result<(), DatabaseError> {
    backend.write(name, encode_collection(records)?)
}

pub fn encode_collection<T: Serialize>(records: &[T]) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(records)?)
}

/// Initialize every collection that was never written from the fixture dataset.
///
/// Returns the collections that were seeded. Collections that exist, even if
/// empty or malformed, are left alone.
pub fn ensure_seeded(backend: &dyn CollectionBackend) -> Result<Vec<CollectionName>, DatabaseError> {
    let mut seeded = Vec::new();
    for name in CollectionName::ALL {
        if backend.read(name)?.is_some() {
            continue;
        }
        let payload = match name {
            CollectionName::Professionals => encode_collection(&fixtures::professionals())?,
            CollectionName::Patients => encode_collection(&fixtures::patients())?,
            CollectionName::Appointments => encode_collection(&fixtures::appointments())?,
        };
        backend.write(name, payload)?;
        tracing::info!(collection = %name, "Seeded collection with fixture data");
        seeded.push(name);
    }
    Ok(seeded)
}

// ═══════════════════════════════════════════
// SQLite backend
// ═══════════════════════════════════════════

pub struct SqliteCollections {
    conn: Connection,
}

impl SqliteCollections {
    /// Open (or create) the collection database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self { conn: open_database(path)? })
    }

    /// Open an in-memory collection database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self { conn: open_memory_database()? })
    }

    /// Raw connection to the underlying database.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CollectionBackend for SqliteCollections {
    fn read(&self, name: CollectionName) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT records FROM collections WHERE name = ?1")?;
        // Blobs and invalid UTF-8 decode lossily and then fail the JSON parse.
        let payload = stmt.query_row([name.as_str()], |row| {
            Ok(match row.get_ref(0)? {
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                _ => String::new(),
            })
        });
        match payload {
            Ok(payload) => Ok(Some(payload)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    fn write_batch(&self, writes: &[(CollectionName, String)]) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        for (name, payload) in writes {
            tx.execute(
                "INSERT INTO collections (name, records, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(name) DO UPDATE SET records = ?2, updated_at = datetime('now')",
                params![name.as_str(), payload],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

// ═══════════════════════════════════════════
// In-memory backend
// ═══════════════════════════════════════════

#[derive(Debug, Default)]
pub struct MemoryCollections {
    entries: RefCell<HashMap<CollectionName, String>>,
}

impl MemoryCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload verbatim, bypassing serialization.
    pub fn insert_raw(&self, name: CollectionName, payload: impl Into<String>) {
        self.entries.borrow_mut().insert(name, payload.into());
    }
}

impl CollectionBackend for MemoryCollections {
    fn read(&self, name: CollectionName) -> Result<Option<String>, DatabaseError> {
        Ok(self.entries.borrow().get(&name).cloned())
    }

    fn write_batch(&self, writes: &[(CollectionName, String)]) -> Result<(), DatabaseError> {
        let mut entries = self.entries.borrow_mut();
        for (name, payload) in writes {
            entries.insert(*name, payload.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    fn sample_professionals() -> Vec<Professional> {
        vec![
            Professional { id: "prof-a".into(), name: "Dr. A".into(), specialty: "Clínica".into() },
            Professional { id: "prof-b".into(), name: "Dr. B".into(), specialty: "Pediatria".into() },
        ]
    }

    #[test]
    fn never_written_collection_loads_empty() {
        let backend = MemoryCollections::new();
        let records: Vec<Patient> = load_collection(&backend, CollectionName::Patients).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_values() {
        let backend = SqliteCollections::open_in_memory().unwrap();
        let profs = sample_professionals();
        save_collection(&backend, CollectionName::Professionals, &profs).unwrap();

        let loaded: Vec<Professional> =
            load_collection(&backend, CollectionName::Professionals).unwrap();
        assert_eq!(loaded, profs);
    }

    #[test]
    fn save_replaces_whole_collection() {
        let backend = SqliteCollections::open_in_memory().unwrap();
        save_collection(&backend, CollectionName::Professionals, &sample_professionals()).unwrap();
        save_collection(&backend, CollectionName::Professionals, &sample_professionals()[..1]).unwrap();

        let loaded: Vec<Professional> =
            load_collection(&backend, CollectionName::Professionals).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "prof-a");
    }

    #[test]
    fn non_text_payload_loads_empty() {
        let backend = SqliteCollections::open_in_memory().unwrap();
        ensure_seeded(&backend).unwrap();
        backend
            .connection()
            .execute("UPDATE collections SET records = X'FFFE00' WHERE name = 'clinic_patients'", [])
            .unwrap();
        backend
            .connection()
            .execute(
                "UPDATE collections SET records = CAST(X'5B80FF5D' AS TEXT) WHERE name = 'clinic_appointments'",
                [],
            )
            .unwrap();

        let patients: Vec<Patient> = load_collection(&backend, CollectionName::Patients).unwrap();
        assert!(patients.is_empty());
        let apps: Vec<Appointment> = load_collection(&backend, CollectionName::Appointments).unwrap();
        assert!(apps.is_empty());
        assert!(ensure_seeded(&backend).unwrap().is_empty());
    }

    #[test]
    fn malformed_payload_loads_empty() {
        let backend = MemoryCollections::new();
        backend.insert_raw(CollectionName::Patients, "{not json");
        let records: Vec<Patient> = load_collection(&backend, CollectionName::Patients).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn wrong_shape_payload_loads_empty() {
        let backend = MemoryCollections::new();
        backend.insert_raw(CollectionName::Professionals, r#"{"id":"prof-1"}"#);
        let records: Vec<Professional> =
            load_collection(&backend, CollectionName::Professionals).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_session_value_defaults_to_zero() {
        let backend = MemoryCollections::new();
        backend.insert_raw(
            CollectionName::Appointments,
            r#"[{"id":"app-9","patientId":"pat-1","patientName":"João Pereira","professionalId":"prof-1","date":"2025-03-01","time":"08:30","notes":""}]"#,
        );
        let records: Vec<Appointment> =
            load_collection(&backend, CollectionName::Appointments).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_value, 0.0);
    }

    #[test]
    fn records_persist_with_camel_case_fields() {
        let backend = MemoryCollections::new();
        save_collection(&backend, CollectionName::Patients, &[Patient {
            id: "pat-x".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "11 90000-0000".into(),
            professional_id: "prof-1".into(),
        }]).unwrap();
        let raw = backend.read(CollectionName::Patients).unwrap().unwrap();
        assert!(raw.contains("\"professionalId\":\"prof-1\""));
    }

    #[test]
    fn seeding_fills_only_unwritten_collections() {
        let backend = MemoryCollections::new();
        save_collection::<Professional>(&backend, CollectionName::Professionals, &[]).unwrap();

        let seeded = ensure_seeded(&backend).unwrap();
        assert_eq!(seeded, vec![CollectionName::Patients, CollectionName::Appointments]);

        let profs: Vec<Professional> =
            load_collection(&backend, CollectionName::Professionals).unwrap();
        assert!(profs.is_empty());
        let patients: Vec<Patient> = load_collection(&backend, CollectionName::Patients).unwrap();
        assert_eq!(patients.len(), 5);
    }

    #[test]
    fn seeding_twice_is_a_no_op() {
        let backend = SqliteCollections::open_in_memory().unwrap();
        assert_eq!(ensure_seeded(&backend).unwrap().len(), 3);
        assert!(ensure_seeded(&backend).unwrap().is_empty());
    }

    #[test]
    fn malformed_collection_is_not_reseeded() {
        let backend = MemoryCollections::new();
        backend.insert_raw(CollectionName::Appointments, "garbage");
        let seeded = ensure_seeded(&backend).unwrap();
        assert!(!seeded.contains(&CollectionName::Appointments));
        let apps: Vec<Appointment> =
            load_collection(&backend, CollectionName::Appointments).unwrap();
        assert!(apps.is_empty());
    }

    #[test]
    fn collections_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinica.db");
        {
            let backend = SqliteCollections::open(&path).unwrap();
            ensure_seeded(&backend).unwrap();
            save_collection(&backend, CollectionName::Professionals, &sample_professionals()).unwrap();
        }

        let backend = SqliteCollections::open(&path).unwrap();
        assert!(ensure_seeded(&backend).unwrap().is_empty());
        let profs: Vec<Professional> =
            load_collection(&backend, CollectionName::Professionals).unwrap();
        assert_eq!(profs, sample_professionals());
    }

    #[test]
    fn batch_write_applies_every_entry() {
        let backend = SqliteCollections::open_in_memory().unwrap();
        backend
            .write_batch(&[
                (CollectionName::Patients, "[]".to_string()),
                (CollectionName::Appointments, "[]".to_string()),
            ])
            .unwrap();
        assert_eq!(backend.read(CollectionName::Patients).unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.read(CollectionName::Appointments).unwrap().as_deref(), Some("[]"));
        assert!(backend.read(CollectionName::Professionals).unwrap().is_none());
    }
}
