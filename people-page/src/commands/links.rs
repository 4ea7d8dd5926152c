use serde::Serialize;

use genealogy::query::{self, CENTURIES, CENTURY_OPTIONS, QUERY, SEX, SORT_COLUMNS};
use genealogy::route::{location_for, Route};
use genealogy::{SearchParams, Sex};

use crate::config::OutputFormat;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkData {
    pub group: &'static str,
    pub label: String,
    pub active: bool,
    pub location: String,
}

/// Every location reachable from the filter panel and the sort headers.
pub fn page_links(slug: Option<&str>, params: &SearchParams) -> Vec<LinkData> {
    let link = |group, label: String, active, next: SearchParams| LinkData {
        group,
        label,
        active,
        location: location_for(slug, &next),
    };
    let mut links = Vec::new();

    for key in SORT_COLUMNS {
        let indicator = query::sort_indicator(params, *key);
        links.push(link(
            "sort",
            key.label().to_string(),
            indicator != query::SortIndicator::Unsorted,
            query::sort_toggle(params, *key),
        ));
    }

    let sex = params.get_non_empty(SEX);
    links.push(link("sex", "All".into(), sex.is_none(), query::set_sex(params, None)));
    for (label, value) in [("Male", Sex::Male), ("Female", Sex::Female)] {
        links.push(link(
            "sex",
            label.into(),
            sex == Some(value.as_str()),
            query::set_sex(params, Some(value)),
        ));
    }

    let centuries = params.get_all(CENTURIES);
    for century in CENTURY_OPTIONS {
        links.push(link(
            "centuries",
            century.to_string(),
            centuries.contains(century),
            query::toggle_century(params, century),
        ));
    }
    links.push(link(
        "centuries",
        "All".into(),
        centuries.is_empty(),
        query::clear_centuries(params),
    ));

    let filtered = [QUERY, SEX, CENTURIES].iter().any(|k| params.contains_key(k));
    links.push(link("reset", "Reset all filters".into(), filtered, query::reset_filters(params)));

    links
}

/// Links for `route`. Needs no people list, so nothing is fetched.
pub fn show_links(route: &Route, output: OutputFormat) -> anyhow::Result<String> {
    let params = query::canonical_query_update(&route.params).unwrap_or_else(|| route.params.clone());
    let links = page_links(route.person_slug.as_deref(), &params);

    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&links)?),
        OutputFormat::Table => Ok(links
            .iter()
            .map(|l| {
                let marker = if l.active { "*" } else { " " };
                format!("{:<10} {} {:<18} {}", l.group, marker, l.label, l.location)
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
