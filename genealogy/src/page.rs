//! The people page: load state, navigation state, and what to show.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::components::EnrichedPerson;
use crate::loader::{LoadResult, PeopleLoader};
use crate::projection::project;
use crate::query::{canonical_query_update, QueryState};
use crate::search_params::SearchParams;
use crate::source::PeopleSource;

pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong";
pub const NO_PEOPLE_MESSAGE: &str = "There are no people on the server";
pub const NO_MATCHES_MESSAGE: &str = "There are no people matching the current search criteria";

// ============================================================================
// Navigation
// ============================================================================

/// Search parameters owned outside the page (the address bar).
pub trait Location {
    fn search_params(&self) -> SearchParams;

    fn set_search_params(&self, params: SearchParams);
}

/// Location held in memory; counts writes.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    params: Mutex<SearchParams>,
    writes: AtomicUsize,
}

impl MemoryLocation {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params: Mutex::new(params),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl Location for MemoryLocation {
    fn search_params(&self) -> SearchParams {
        self.params.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_search_params(&self, params: SearchParams) {
        *self.params.lock().unwrap_or_else(|e| e.into_inner()) = params;
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

/// Drop an empty `query` from the location. Writes only when that changes
/// the parameters; returns whether it wrote.
pub fn normalize_location(location: &dyn Location) -> bool {
    match canonical_query_update(&location.search_params()) {
        Some(canonical) => {
            debug!("Removing empty query parameter");
            location.set_search_params(canonical);
            true
        }
        None => false,
    }
}

// ============================================================================
// Page State
// ============================================================================

#[derive(Debug, Clone)]
pub struct PageState {
    pub people: Vec<EnrichedPerson>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            people: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl PageState {
    /// Apply the outcome of the fetch. The cause of a failure is never shown.
    pub fn complete(&mut self, result: LoadResult) {
        match result {
            Ok(people) => self.people = people,
            Err(_) => self.error = Some(LOAD_ERROR_MESSAGE.to_string()),
        }
        self.is_loading = false;
    }

    pub fn view<'a>(&'a self, params: &'a SearchParams, selected_slug: Option<&'a str>) -> PageView<'a> {
        if !self.people.is_empty() {
            let state = QueryState::from_params(params);
            return PageView::Table(TableView {
                people: project(&self.people, &state),
                params,
                selected_slug,
            });
        }

        if self.is_loading {
            PageView::Loading
        } else if let Some(error) = &self.error {
            PageView::Error(error)
        } else {
            PageView::NoPeople
        }
    }
}

/// What the page shows for one render.
#[derive(Debug)]
pub enum PageView<'a> {
    Table(TableView<'a>),
    Loading,
    Error(&'a str),
    NoPeople,
}

#[derive(Debug)]
pub struct TableView<'a> {
    pub people: Vec<&'a EnrichedPerson>,
    /// Current parameters, for sort-header links.
    pub params: &'a SearchParams,
    pub selected_slug: Option<&'a str>,
}

impl TableView<'_> {
    pub fn is_selected(&self, person: &EnrichedPerson) -> bool {
        self.selected_slug == Some(person.slug.as_str())
    }

    /// Message to show instead of rows when the filters match nobody.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.people.is_empty().then_some(NO_MATCHES_MESSAGE)
    }
}

// ============================================================================
// Page
// ============================================================================

/// A mounted page. Dropping it unmounts: a fetch still in flight will not
/// touch the state afterwards.
pub struct PeoplePage {
    state: Arc<Mutex<PageState>>,
    loader: PeopleLoader,
}

impl PeoplePage {
    /// Mount the page and start the single fetch.
    pub fn mount(source: Arc<dyn PeopleSource>) -> Self {
        info!("Mounting people page");
        let state = Arc::new(Mutex::new(PageState::default()));
        let sink = Arc::clone(&state);

        let mut loader = PeopleLoader::new();
        loader.start(source, move |result| {
            sink.lock().unwrap_or_else(|e| e.into_inner()).complete(result);
        });

        Self { state, loader }
    }

    pub fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Block until the fetch has completed.
    pub fn wait_loaded(&mut self) {
        self.loader.wait();
    }

    /// Normalize the location, then hand the current view to `draw`.
    pub fn render<R>(
        &self,
        location: &dyn Location,
        selected_slug: Option<&str>,
        draw: impl FnOnce(&PageView<'_>) -> R,
    ) -> R {
        normalize_location(location);
        let params = location.search_params();
        let state = self.state();
        let view = state.view(&params, selected_slug);
        draw(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Person, Sex};
    use crate::enrichment::link_parents;
    use crate::source::{SourceError, StaticSource};

    fn person(name: &str, born: i32) -> Person {
        Person {
            name: name.to_string(),
            sex: Sex::Male,
            born,
            died: born + 60,
            mother_name: None,
            father_name: None,
            slug: format!("{}-{}", name.to_lowercase(), born),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = PageState::default();
        let params = SearchParams::new();
        assert!(matches!(state.view(&params, None), PageView::Loading));
    }

    #[test]
    fn test_failed_fetch_shows_error_not_empty_message() {
        let mut state = PageState::default();
        state.complete(Err(SourceError::Unavailable("503".into())));

        assert!(!state.is_loading);
        assert!(state.people.is_empty());
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));

        let params = SearchParams::new();
        match state.view(&params, None) {
            PageView::Error(msg) => assert_eq!(msg, LOAD_ERROR_MESSAGE),
            other => panic!("expected error view, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_server_list() {
        let mut state = PageState::default();
        state.complete(Ok(Vec::new()));
        let params = SearchParams::new();
        assert!(matches!(state.view(&params, None), PageView::NoPeople));
    }

    #[test]
    fn test_table_with_selection_and_no_matches() {
        let mut state = PageState::default();
        state.complete(Ok(link_parents(&[person("Abel", 1700), person("Cain", 1702)])));

        let params = SearchParams::parse("sort=born&order=desc");
        let PageView::Table(table) = state.view(&params, Some("abel-1700")) else {
            panic!("expected table");
        };
        assert_eq!(table.people.len(), 2);
        assert_eq!(table.people[0].name, "Cain");
        assert!(table.is_selected(table.people[1]));
        assert!(!table.is_selected(table.people[0]));
        assert_eq!(table.empty_message(), None);

        let params = SearchParams::parse("sex=f");
        let PageView::Table(table) = state.view(&params, None) else {
            panic!("expected table");
        };
        assert_eq!(table.empty_message(), Some(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_normalize_location_does_not_loop() {
        let location = MemoryLocation::new(SearchParams::parse("sex=m"));
        for _ in 0..5 {
            assert!(!normalize_location(&location));
        }
        assert_eq!(location.write_count(), 0);

        let location = MemoryLocation::new(SearchParams::parse("query=&sex=m"));
        assert!(normalize_location(&location));
        assert!(!normalize_location(&location));
        assert_eq!(location.write_count(), 1);
        assert_eq!(location.search_params().to_query_string(), "sex=m");
    }

    #[test]
    fn test_mounted_page_renders_after_load() {
        let source = Arc::new(StaticSource::People(vec![person("Abel", 1700)]));
        let mut page = PeoplePage::mount(source);
        page.wait_loaded();
        assert!(!page.is_loading());

        let location = MemoryLocation::new(SearchParams::parse("query="));
        let rows = page.render(&location, None, |view| match view {
            PageView::Table(table) => table.people.len(),
            _ => 0,
        });
        assert_eq!(rows, 1);
        assert_eq!(location.write_count(), 1);
    }

    struct BrokenSource;

    impl PeopleSource for BrokenSource {
        fn get_people(&self) -> Result<Vec<Person>, SourceError> {
            panic!("malformed payload");
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_panicking_source_clears_loading() {
        let mut page = PeoplePage::mount(Arc::new(BrokenSource));
        page.wait_loaded();

        assert!(!page.is_loading());
        assert_eq!(page.state().error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_mounted_page_failure() {
        let mut page = PeoplePage::mount(Arc::new(StaticSource::Failing("offline".into())));
        page.wait_loaded();

        let location = MemoryLocation::default();
        let shown = page.render(&location, None, |view| matches!(view, PageView::Error(_)));
        assert!(shown);
        assert_eq!(location.write_count(), 0);
    }
}
