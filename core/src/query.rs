//! Translation of caller filters into the posts endpoint's query string.
//!
//! The posts endpoint takes a handful of control parameters directly and
//! everything else through its `q` search expression, written as
//! space-separated `field:value` tokens. `translate` splits a `FilterMap`
//! along that line.

use crate::types::PageCursor;

/// Query keys the API consumes directly, in emission order.
pub const RESERVED_KEYS: [&str; 6] = ["page", "per_page", "q", "include", "sort", "order"];

/// Insertion-ordered multimap of filter parameters.
///
/// Keys may repeat (`tag` twice filters on both tags). An empty key stands
/// for a bare free-text term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    pairs: Vec<(String, String)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder form of `add`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// First value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored for `key`, in insertion order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this map with `page` set to `cursor`, for fetching the page a
    /// previous response pointed at.
    pub fn for_page(&self, cursor: &PageCursor) -> Self {
        let mut next = self.clone();
        next.pairs.retain(|(k, _)| k != "page");
        next.add("page", cursor.to_string());
        next
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of `translate`: pass-through control parameters plus the
/// generated search expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedQuery {
    pub control: Vec<(String, String)>,
    pub search: String,
}

impl TranslatedQuery {
    /// Query pairs in wire order. `q` is always present, even when the
    /// search expression is empty.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let mut pairs = self.control;
        pairs.push(("q".to_string(), self.search));
        pairs
    }
}

/// Split `filters` into control parameters and a `q` search expression.
///
/// Reserved keys contribute only their first value, and only when it is
/// non-empty; they never become search tokens. Every other pair becomes a
/// `key:value` token (or bare `value` for an empty key), joined by single
/// spaces in insertion order.
pub fn translate(filters: &FilterMap) -> TranslatedQuery {
    let control = RESERVED_KEYS
        .iter()
        .filter_map(|&key| match filters.get(key) {
            Some(value) if !value.is_empty() => Some((key.to_string(), value.to_string())),
            _ => None,
        })
        .collect();

    let search = filters
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(key))
        .map(|(key, value)| search_token(key, value))
        .collect::<Vec<_>>()
        .join(" ");

    TranslatedQuery { control, search }
}

fn search_token(key: &str, value: &str) -> String {
    if key.is_empty() {
        value.to_string()
    } else {
        format!("{key}:{value}")
    }
}
