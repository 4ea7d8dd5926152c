//! Person records as served by the people API, and their enriched form.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Person
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Sex {
    /// Wire value, also used as the `sex` search parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "m" => Some(Sex::Male),
            "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the flat people list. `name` is the join key for parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub sex: Sex,
    pub born: i32,
    pub died: i32,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    pub slug: String,
}

impl Person {
    /// Birth century: `ceil(born / 100)`.
    pub fn century(&self) -> i32 {
        century_of(self.born)
    }
}

pub fn century_of(year: i32) -> i32 {
    year.div_euclid(100) + i32::from(year.rem_euclid(100) != 0)
}

// ============================================================================
// Enriched Person
// ============================================================================

/// A person with mother/father resolved against the same list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPerson {
    #[serde(flatten)]
    pub person: Person,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<Person>,
}

impl std::ops::Deref for EnrichedPerson {
    type Target = Person;

    fn deref(&self) -> &Person {
        &self.person
    }
}
