use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

use genealogy::page::{PageView, NO_PEOPLE_MESSAGE};
use genealogy::route::{location_for, Route};
use genealogy::{
    EnrichedPerson, FileSource, HttpSource, Location, MemoryLocation, PeoplePage, PeopleSource, Person,
};

use crate::config::PageConfig;

/// Application state for one invocation
pub struct AppState {
    pub config: PageConfig,
    pub page: PeoplePage,
    pub location: MemoryLocation,
    pub person_slug: Option<String>,
}

impl AppState {
    /// Mount the page against the configured source.
    pub fn mount(config: PageConfig, route: Route) -> anyhow::Result<Self> {
        let source: Arc<dyn PeopleSource> = match &config.file {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(
                HttpSource::new(config.api_url.clone(), config.timeout())
                    .context("building HTTP client")?,
            ),
        };

        Ok(Self {
            page: PeoplePage::mount(source),
            location: MemoryLocation::new(route.params),
            person_slug: route.person_slug,
            config,
        })
    }

    /// Current location, after any normalization writes.
    pub fn current_location(&self) -> String {
        location_for(self.person_slug.as_deref(), &self.location.search_params())
    }
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone)]
pub struct ParentData {
    pub name: String,
    /// Set when the name resolved to a record in the list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct PersonRow {
    pub name: String,
    pub sex: String,
    pub born: i32,
    pub died: i32,
    pub slug: String,
    pub mother: Option<ParentData>,
    pub father: Option<ParentData>,
    pub selected: bool,
}

fn parent_data(name: Option<&str>, resolved: Option<&Person>) -> Option<ParentData> {
    match (name, resolved) {
        (_, Some(parent)) => Some(ParentData {
            name: parent.name.clone(),
            slug: Some(parent.slug.clone()),
        }),
        (Some(name), None) if !name.is_empty() => Some(ParentData {
            name: name.to_string(),
            slug: None,
        }),
        _ => None,
    }
}

impl PersonRow {
    pub fn build(person: &EnrichedPerson, selected: bool) -> Self {
        Self {
            name: person.name.clone(),
            sex: person.sex.to_string(),
            born: person.born,
            died: person.died,
            slug: person.slug.clone(),
            mother: parent_data(person.mother_name.as_deref(), person.mother.as_ref()),
            father: parent_data(person.father_name.as_deref(), person.father.as_ref()),
            selected,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutput {
    Table {
        location: String,
        rows: Vec<PersonRow>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Loading,
    Error {
        message: String,
    },
    NoPeople {
        message: String,
    },
}

impl PageOutput {
    pub fn from_view(view: &PageView<'_>, location: String) -> Self {
        match view {
            PageView::Table(table) => PageOutput::Table {
                location,
                rows: table
                    .people
                    .iter()
                    .map(|p| PersonRow::build(p, table.is_selected(p)))
                    .collect(),
                message: table.empty_message().map(str::to_string),
            },
            PageView::Loading => PageOutput::Loading,
            PageView::Error(message) => PageOutput::Error {
                message: message.to_string(),
            },
            PageView::NoPeople => PageOutput::NoPeople {
                message: NO_PEOPLE_MESSAGE.to_string(),
            },
        }
    }
}
