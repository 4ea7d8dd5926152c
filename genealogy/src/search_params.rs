//! URL search parameters
//!
//! An ordered multimap of key/value pairs, as found in a query string.
//! Keys may repeat (`centuries=18&centuries=19`); insertion order is kept.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

/// A change to one key, applied by [`SearchParams::with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamUpdate {
    /// Delete every value of the key.
    Remove,
    /// Replace the key with one value.
    Set(String),
    /// Replace the key with several values (empty list removes it).
    SetAll(Vec<String>),
}

impl ParamUpdate {
    pub fn set(value: impl Into<String>) -> Self {
        ParamUpdate::Set(value.into())
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    /// `+` decodes to a space; undecodable escapes are kept verbatim.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { pairs }
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of `key`, treating an empty value as unset.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Replace every value of `key` with `value`, keeping the position of the
    /// first occurrence.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                self.pairs[pos].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Return a copy with `updates` applied, leaving `self` untouched.
    pub fn with<K, I>(&self, updates: I) -> SearchParams
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, ParamUpdate)>,
    {
        let mut next = self.clone();
        for (key, update) in updates {
            let key = key.as_ref();
            match update {
                ParamUpdate::Remove => next.delete(key),
                ParamUpdate::Set(value) => next.set(key, value),
                ParamUpdate::SetAll(values) => {
                    next.delete(key);
                    for value in values {
                        next.append(key, value);
                    }
                }
            }
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let params = SearchParams::parse("?query=ann&centuries=18&centuries=19&order=desc");
        assert_eq!(params.get("query"), Some("ann"));
        assert_eq!(params.get_all("centuries"), vec!["18", "19"]);
        assert_eq!(params.get("missing"), None);
        assert!(params.get_all("missing").is_empty());
    }

    #[test]
    fn test_parse_decodes() {
        let params = SearchParams::parse("query=jan+van%20brussel&sex");
        assert_eq!(params.get("query"), Some("jan van brussel"));
        assert_eq!(params.get("sex"), Some(""));
        assert_eq!(params.get_non_empty("sex"), None);
    }

    #[test]
    fn test_with_removes_sets_and_replaces() {
        let params = SearchParams::parse("query=a&sex=m&centuries=16&centuries=17");

        let next = params.with([
            ("query", ParamUpdate::Remove),
            ("sex", ParamUpdate::set("f")),
            ("centuries", ParamUpdate::SetAll(vec!["20".into()])),
        ]);

        assert_eq!(next.to_query_string(), "sex=f&centuries=20");
        // original untouched
        assert_eq!(params.get("query"), Some("a"));
    }

    #[test]
    fn test_set_collapses_duplicates_in_place() {
        let mut params = SearchParams::parse("sort=born&x=1&sort=died");
        params.set("sort", "name");
        assert_eq!(params.to_query_string(), "sort=name&x=1");
    }

    #[test]
    fn test_query_string_encodes() {
        let params: SearchParams = [("query", "de vries & co")].into_iter().collect();
        assert_eq!(params.to_string(), "query=de%20vries%20%26%20co");
        assert_eq!(SearchParams::parse(&params.to_string()), params);
    }
}
