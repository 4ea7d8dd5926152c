//! Persistence module for people snapshots
//!
//! A snapshot is the people list plus a schema version and export time.
//! Readers also accept the bare JSON array the people API serves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::Person;

pub const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),
}

// ============================================================================
// Snapshot Data Structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u8, // Schema version for forward compatibility
    pub exported_at: DateTime<Utc>,
    pub people: Vec<Person>,
}

/// Either on-disk shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum PeopleDocument {
    Snapshot(Snapshot),
    List(Vec<Person>),
}

/// Result of a snapshot write
#[derive(Debug, Clone)]
pub struct SaveStats {
    pub population: u32,
    pub file_bytes: u64,
}

// ============================================================================
// Read / Write
// ============================================================================

/// Parse a people document (snapshot or bare array).
pub fn parse_people(json: &str) -> Result<Vec<Person>, PersistenceError> {
    match serde_json::from_str::<PeopleDocument>(json)? {
        PeopleDocument::List(people) => Ok(people),
        PeopleDocument::Snapshot(snapshot) => {
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(PersistenceError::UnsupportedVersion(snapshot.version));
            }
            Ok(snapshot.people)
        }
    }
}

pub fn read_people(path: &Path) -> Result<Vec<Person>, PersistenceError> {
    let json = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_people(&json)
}

pub fn export_people<'a, I>(people: I) -> Result<String, PersistenceError>
where
    I: IntoIterator<Item = &'a Person>,
{
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        exported_at: Utc::now(),
        people: people.into_iter().cloned().collect(),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

pub fn save_people<'a, I>(people: I, path: &Path) -> Result<SaveStats, PersistenceError>
where
    I: IntoIterator<Item = &'a Person>,
{
    let people: Vec<&Person> = people.into_iter().collect();
    let json = export_people(people.iter().copied())?;
    fs::write(path, &json).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(SaveStats {
        population: people.len() as u32,
        file_bytes: json.len() as u64,
    })
}
