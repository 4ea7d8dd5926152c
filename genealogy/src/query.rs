//! Filter and sort state read from search parameters, and the parameter
//! updates the filter panel and table headers produce.

use crate::components::Sex;
use crate::search_params::{ParamUpdate, SearchParams};

pub const QUERY: &str = "query";
pub const SEX: &str = "sex";
pub const CENTURIES: &str = "centuries";
pub const SORT: &str = "sort";
pub const ORDER: &str = "order";

/// Value written to `order` when a column is sorted descending.
pub const DESCENDING: &str = "desc";

/// Centuries offered by the filter panel.
pub const CENTURY_OPTIONS: &[&str] = &["16", "17", "18", "19", "20"];

/// Sortable columns, in table order.
pub const SORT_COLUMNS: &[SortKey] = &[SortKey::Name, SortKey::Sex, SortKey::Born, SortKey::Died];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Sex,
    Born,
    Died,
}

impl SortKey {
    /// Unknown keys sort like `died`.
    pub fn from_param(value: &str) -> Self {
        match value {
            "name" => SortKey::Name,
            "sex" => SortKey::Sex,
            "born" => SortKey::Born,
            _ => SortKey::Died,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Sex => "sex",
            SortKey::Born => "born",
            SortKey::Died => "died",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Sex => "Sex",
            SortKey::Born => "Born",
            SortKey::Died => "Died",
        }
    }
}

/// Everything the projection needs, borrowed from the current parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState<'a> {
    pub query: &'a str,
    /// Raw `sex` value. Values other than `m`/`f` match nobody.
    pub sex: Option<&'a str>,
    pub centuries: Vec<&'a str>,
    /// Raw `sort` value; see [`SortKey::from_param`].
    pub sort: Option<&'a str>,
    pub descending: bool,
}

impl<'a> QueryState<'a> {
    pub fn from_params(params: &'a SearchParams) -> Self {
        Self {
            query: params.get(QUERY).unwrap_or(""),
            sex: params.get_non_empty(SEX),
            centuries: params.get_all(CENTURIES),
            sort: params.get_non_empty(SORT),
            descending: params.get_non_empty(ORDER).is_some(),
        }
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.map(SortKey::from_param)
    }
}

/// Canonical form of `params` when `query` is present but empty.
///
/// Returns `None` when nothing would change, so applying the result in a
/// loop settles after one write.
pub fn canonical_query_update(params: &SearchParams) -> Option<SearchParams> {
    if params.get(QUERY).unwrap_or("").is_empty() && params.contains_key(QUERY) {
        Some(params.with([(QUERY, ParamUpdate::Remove)]))
    } else {
        None
    }
}

// ============================================================================
// Filter panel
// ============================================================================

pub fn set_query(params: &SearchParams, text: &str) -> SearchParams {
    let update = if text.is_empty() {
        ParamUpdate::Remove
    } else {
        ParamUpdate::set(text)
    };
    params.with([(QUERY, update)])
}

/// `None` is the "All" choice.
pub fn set_sex(params: &SearchParams, sex: Option<Sex>) -> SearchParams {
    let update = match sex {
        Some(sex) => ParamUpdate::set(sex.as_str()),
        None => ParamUpdate::Remove,
    };
    params.with([(SEX, update)])
}

pub fn toggle_century(params: &SearchParams, century: &str) -> SearchParams {
    let current = params.get_all(CENTURIES);
    let next: Vec<String> = if current.contains(&century) {
        current
            .into_iter()
            .filter(|c| *c != century)
            .map(str::to_string)
            .collect()
    } else {
        current
            .into_iter()
            .chain(std::iter::once(century))
            .map(str::to_string)
            .collect()
    };
    params.with([(CENTURIES, ParamUpdate::SetAll(next))])
}

pub fn clear_centuries(params: &SearchParams) -> SearchParams {
    params.with([(CENTURIES, ParamUpdate::Remove)])
}

pub fn reset_filters(params: &SearchParams) -> SearchParams {
    params.with([
        (QUERY, ParamUpdate::Remove),
        (SEX, ParamUpdate::Remove),
        (CENTURIES, ParamUpdate::Remove),
    ])
}

// ============================================================================
// Sort headers
// ============================================================================

/// Direction a column header currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

pub fn sort_indicator(params: &SearchParams, key: SortKey) -> SortIndicator {
    if params.get_non_empty(SORT) != Some(key.as_str()) {
        SortIndicator::Unsorted
    } else if params.get_non_empty(ORDER).is_some() {
        SortIndicator::Descending
    } else {
        SortIndicator::Ascending
    }
}

/// Parameters after clicking the `key` header:
/// unsorted -> ascending -> descending -> unsorted.
pub fn sort_toggle(params: &SearchParams, key: SortKey) -> SearchParams {
    match sort_indicator(params, key) {
        SortIndicator::Unsorted => params.with([
            (SORT, ParamUpdate::set(key.as_str())),
            (ORDER, ParamUpdate::Remove),
        ]),
        SortIndicator::Ascending => params.with([(ORDER, ParamUpdate::set(DESCENDING))]),
        SortIndicator::Descending => {
            params.with([(SORT, ParamUpdate::Remove), (ORDER, ParamUpdate::Remove)])
        }
    }
}
