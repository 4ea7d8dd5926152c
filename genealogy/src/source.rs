//! Where the people list comes from.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::components::Person;
use crate::persistence::{self, PersistenceError};

/// Default people API.
pub const DEFAULT_API_URL: &str = "https://mate-academy.github.io/react_people-table/api/people.json";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("people API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    File(#[from] PersistenceError),

    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("people fetch panicked: {0}")]
    Panicked(String),
}

/// Fetches the full, flat people list. Any failure is a single error kind to
/// the page; the variant only matters for logs.
pub trait PeopleSource: Send + Sync {
    fn get_people(&self) -> Result<Vec<Person>, SourceError>;

    fn describe(&self) -> String;
}

// ============================================================================
// HTTP
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl PeopleSource for HttpSource {
    fn get_people(&self) -> Result<Vec<Person>, SourceError> {
        let resp = self.client.get(&self.url).send()?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }
        let body = resp.text()?;
        Ok(persistence::parse_people(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ============================================================================
// File
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PeopleSource for FileSource {
    fn get_people(&self) -> Result<Vec<Person>, SourceError> {
        Ok(persistence::read_people(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Fixed answer, for demos and tests.
#[derive(Debug, Clone)]
pub enum StaticSource {
    People(Vec<Person>),
    Failing(String),
}

impl PeopleSource for StaticSource {
    fn get_people(&self) -> Result<Vec<Person>, SourceError> {
        match self {
            StaticSource::People(people) => Ok(people.clone()),
            StaticSource::Failing(reason) => Err(SourceError::Unavailable(reason.clone())),
        }
    }

    fn describe(&self) -> String {
        match self {
            StaticSource::People(people) => format!("static list ({} people)", people.len()),
            StaticSource::Failing(_) => "failing source".to_string(),
        }
    }
}
