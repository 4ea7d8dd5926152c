//! Genealogy people page engine
//!
//! Loads a flat list of people, links each to its mother and father by name,
//! and projects the list through the filters and sort order carried in URL
//! search parameters.

pub mod components;
pub mod enrichment;
pub mod search_params;
pub mod query;
pub mod projection;
pub mod persistence;
pub mod source;
pub mod loader;
pub mod page;
pub mod route;
pub mod names;

pub use components::*;
pub use enrichment::link_parents;
pub use page::{Location, MemoryLocation, PageState, PageView, PeoplePage, TableView};
pub use projection::project;
pub use query::{QueryState, SortKey};
pub use search_params::{ParamUpdate, SearchParams};
pub use source::{FileSource, HttpSource, PeopleSource, SourceError, StaticSource};
