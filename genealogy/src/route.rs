//! `/people/:personSlug?<search>` locations.

use crate::search_params::SearchParams;

pub const PEOPLE_PATH: &str = "/people";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Selected person, from `/people/<slug>`.
    pub person_slug: Option<String>,
    pub params: SearchParams,
}

impl Route {
    /// Rebuild the location string.
    pub fn to_location(&self) -> String {
        location_for(self.person_slug.as_deref(), &self.params)
    }
}

/// Parse a location. Accepts a bare query string (`?sex=f` or `sex=f`) as
/// well as a path; paths outside `/people` select nobody.
pub fn parse_location(location: &str) -> Route {
    let location = location.split('#').next().unwrap_or("");
    let (path, query) = match location.split_once('?') {
        Some((path, query)) => (path, query),
        None if location.starts_with('/') => (location, ""),
        None => ("", location),
    };

    let person_slug = path
        .strip_prefix(PEOPLE_PATH)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.trim_end_matches('/'))
        .filter(|slug| !slug.is_empty() && !slug.contains('/'))
        .map(decode_segment);

    Route {
        person_slug,
        params: SearchParams::parse(query),
    }
}

/// Location for a page showing `params` with `slug` selected.
pub fn location_for(slug: Option<&str>, params: &SearchParams) -> String {
    let mut location = match slug {
        Some(slug) => format!("{}/{}", PEOPLE_PATH, urlencoding::encode(slug)),
        None => PEOPLE_PATH.to_string(),
    };
    if !params.is_empty() {
        location.push('?');
        location.push_str(&params.to_query_string());
    }
    location
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
