use std::io::Write;
use std::sync::Arc;

use genealogy::page::{LOAD_ERROR_MESSAGE, NO_MATCHES_MESSAGE};
use genealogy::query::{self, SortKey};
use genealogy::route::parse_location;
use genealogy::{FileSource, Location, MemoryLocation, PageView, PeoplePage, SearchParams, StaticSource};

const PEOPLE_JSON: &str = r#"[
  {"name":"Carolus Haverbeke","sex":"m","born":1832,"died":1905,"fatherName":"Carel Haverbeke","motherName":"Maria van Brussel","slug":"carolus-haverbeke-1832"},
  {"name":"Emma de Milliano","sex":"f","born":1876,"died":1956,"fatherName":"Petrus de Milliano","motherName":"Sophia van Damme","slug":"emma-de-milliano-1876"},
  {"name":"Maria de Rycke","sex":"f","born":1683,"died":1724,"fatherName":"Frederik de Rycke","motherName":"Laurentia van Vlaenderen","slug":"maria-de-rycke-1683"},
  {"name":"Jan van Brussel","sex":"m","born":1714,"died":1748,"fatherName":"Jacobus van Brussel","motherName":null,"slug":"jan-van-brussel-1714"},
  {"name":"Philibert Haverbeke","sex":"m","born":1907,"died":1997,"fatherName":"Emile Haverbeke","motherName":"Emma de Milliano","slug":"philibert-haverbeke-1907"},
  {"name":"Jan Frans van Brussel","sex":"m","born":1761,"died":1833,"fatherName":"Jacobus Bernardus van Brussel","motherName":null,"slug":"jan-frans-van-brussel-1761"},
  {"name":"Pauwels van Haverbeke","sex":"m","born":1535,"died":1582,"fatherName":"N. van Haverbeke","motherName":null,"slug":"pauwels-van-haverbeke-1535"},
  {"name":"Clara Aernoudts","sex":"f","born":1918,"died":2012,"fatherName":"Henry Aernoudts","motherName":"Sidonie Coene","slug":"clara-aernoudts-1918"},
  {"name":"Emile Haverbeke","sex":"m","born":1877,"died":1968,"fatherName":"Carolus Haverbeke","motherName":"Maria Sturm","slug":"emile-haverbeke-1877"}
]"#;

fn mounted_page() -> PeoplePage {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PEOPLE_JSON.as_bytes()).unwrap();
    // keep the file alive until the fetch finished
    let mut page = PeoplePage::mount(Arc::new(FileSource::new(file.path())));
    page.wait_loaded();
    page
}

fn rows(page: &PeoplePage, location: &str) -> Vec<String> {
    let route = parse_location(location);
    let nav = MemoryLocation::new(route.params.clone());
    page.render(&nav, route.person_slug.as_deref(), |view| match view {
        PageView::Table(table) => table.people.iter().map(|p| p.name.clone()).collect(),
        other => panic!("expected table, got {:?}", other),
    })
}

#[test]
fn loads_and_links_parents_from_file() {
    let page = mounted_page();
    let state = page.state();

    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.people.len(), 9);

    let philibert = state.people.iter().find(|p| p.name == "Philibert Haverbeke").unwrap();
    assert_eq!(philibert.father.as_ref().unwrap().slug, "emile-haverbeke-1877");
    assert_eq!(philibert.mother.as_ref().unwrap().born, 1876);

    let jan = state.people.iter().find(|p| p.name == "Jan van Brussel").unwrap();
    assert!(jan.mother.is_none());
    assert!(jan.father.is_none());
}

#[test]
fn filters_compose_from_location() {
    let page = mounted_page();

    assert_eq!(
        rows(&page, "/people?sex=f"),
        vec!["Emma de Milliano", "Maria de Rycke", "Clara Aernoudts"]
    );
    assert_eq!(
        rows(&page, "/people?query=EMMA"),
        vec!["Emma de Milliano", "Philibert Haverbeke"]
    );
    assert_eq!(
        rows(&page, "/people?centuries=19&centuries=20&sex=m&sort=born&order=desc"),
        vec!["Philibert Haverbeke", "Emile Haverbeke", "Carolus Haverbeke"]
    );
    assert!(rows(&page, "/people?sex=unknown").is_empty());
}

#[test]
fn text_filter_matches_father_name() {
    let page = mounted_page();
    assert_eq!(
        rows(&page, "/people?query=jacobus"),
        vec!["Jan van Brussel", "Jan Frans van Brussel"]
    );
}

#[test]
fn unknown_sort_orders_by_death() {
    let page = mounted_page();
    assert_eq!(rows(&page, "?sort=height"), rows(&page, "?sort=died"));
    assert_eq!(rows(&page, "?sort=died").first().map(String::as_str), Some("Pauwels van Haverbeke"));
}

#[test]
fn sort_header_links_cycle() {
    let page = mounted_page();
    let start = SearchParams::parse("sex=m");

    let asc = query::sort_toggle(&start, SortKey::Name);
    let desc = query::sort_toggle(&asc, SortKey::Name);

    let asc_rows = rows(&page, &format!("?{}", asc));
    let mut desc_rows = rows(&page, &format!("?{}", desc));
    desc_rows.reverse();
    assert_eq!(asc_rows, desc_rows);
    assert_eq!(asc_rows.first().map(String::as_str), Some("Carolus Haverbeke"));
}

#[test]
fn selected_row_and_empty_match_message() {
    let page = mounted_page();
    let route = parse_location("/people/emma-de-milliano-1876?query=zzz");
    let nav = MemoryLocation::new(route.params.clone());

    page.render(&nav, route.person_slug.as_deref(), |view| {
        let PageView::Table(table) = view else {
            panic!("expected table");
        };
        assert_eq!(table.selected_slug, Some("emma-de-milliano-1876"));
        assert_eq!(table.empty_message(), Some(NO_MATCHES_MESSAGE));
    });
}

#[test]
fn failed_fetch_shows_only_the_error() {
    let mut page = PeoplePage::mount(Arc::new(StaticSource::Failing("connection refused".into())));
    page.wait_loaded();

    let nav = MemoryLocation::default();
    page.render(&nav, None, |view| match view {
        PageView::Error(message) => assert_eq!(*message, LOAD_ERROR_MESSAGE),
        other => panic!("expected error view, got {:?}", other),
    });
}

#[test]
fn missing_file_is_a_fetch_failure() {
    let mut page = PeoplePage::mount(Arc::new(FileSource::new("/definitely/not/here.json")));
    page.wait_loaded();

    let state = page.state();
    assert!(!state.is_loading);
    assert!(state.people.is_empty());
    assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
}

#[test]
fn empty_query_is_removed_once() {
    let page = mounted_page();
    let nav = MemoryLocation::new(SearchParams::parse("query=&sort=born"));

    for _ in 0..3 {
        page.render(&nav, None, |_| ());
    }

    assert_eq!(nav.write_count(), 1);
    assert_eq!(nav.search_params().to_query_string(), "sort=born");
}
