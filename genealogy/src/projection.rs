//! View projection: filter then sort the enriched list for display.
//!
//! Stages run in a fixed order (sex, text, century, sort) and only ever
//! narrow or reorder references into the source list.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::components::EnrichedPerson;
use crate::query::{QueryState, SortKey};

/// Filter and sort `people` for `state`. Records are borrowed, never mutated.
pub fn project<'p>(people: &'p [EnrichedPerson], state: &QueryState<'_>) -> Vec<&'p EnrichedPerson> {
    let mut visible: Vec<&EnrichedPerson> = people.iter().collect();

    if let Some(sex) = state.sex {
        visible.retain(|p| p.sex.as_str() == sex);
    }

    if !state.query.is_empty() {
        let needle = state.query.to_lowercase();
        visible.retain(|p| matches_text(p, &needle));
    }

    if !state.centuries.is_empty() {
        visible.retain(|p| {
            let century = p.century().to_string();
            state.centuries.iter().any(|c| *c == century)
        });
    }

    if let Some(key) = state.sort_key() {
        sort_people(&mut visible, key);
        if state.descending {
            visible.reverse();
        }
    }

    visible
}

/// `needle` must already be lowercase.
fn matches_text(person: &EnrichedPerson, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(person.name.as_str())
        || person.mother_name.as_deref().is_some_and(contains)
        || person.father_name.as_deref().is_some_and(contains)
}

/// Stable ascending sort by `key`.
pub fn sort_people(people: &mut [&EnrichedPerson], key: SortKey) {
    match key {
        SortKey::Name => people.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::Sex => people.sort_by(|a, b| collate(a.sex.as_str(), b.sex.as_str())),
        SortKey::Born => people.sort_by_key(|p| p.born),
        SortKey::Died => people.sort_by_key(|p| p.died),
    }
}

/// Locale-style string order. Base letters compare first, ignoring accents
/// and case; then unaccented before accented; then lowercase before upper.
pub fn collate(a: &str, b: &str) -> Ordering {
    let base = |s: &str| {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect::<Vec<char>>()
    };
    let accented = |s: &str| s.nfd().flat_map(char::to_lowercase).collect::<Vec<char>>();

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}
