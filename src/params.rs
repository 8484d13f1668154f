//! Query parameters and the typed inputs of each operation.
//!
//! Every operation turns its typed input into a [`QueryParams`] mapping, which
//! is then serialized into the request's query string. Values are
//! percent-encoded exactly once, in [`QueryParams::to_query_string`].

use std::collections::BTreeMap;
use std::fmt::Display;
use url::form_urlencoded;

/// An ordered mapping from parameter name to string value.
///
/// Keys are kept sorted, so the serialized query string is deterministic.
///
/// # Examples
///
/// ```
/// use refuge_restrooms::QueryParams;
///
/// let params = QueryParams::new()
///     .with("page", 2)
///     .with("query", "a b")
///     .with_flag("ada", true)
///     .with_flag("unisex", false);
///
/// assert_eq!(params.to_query_string(), "?ada=true&page=2&query=a+b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any previous value under the same key.
    ///
    /// Numbers go through `Display`, which does not depend on the process locale.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.params.insert(key.into(), value.to_string());
    }

    /// Inserts `key=true` when `enabled` is set; does nothing otherwise.
    pub fn insert_flag(&mut self, key: impl Into<String>, enabled: bool) {
        if enabled {
            self.insert(key, "true");
        }
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Chaining form of [`insert_flag`](Self::insert_flag).
    pub fn with_flag(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.insert_flag(key, enabled);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of parameters, including empty ones.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters were inserted.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes to `?k1=v1&k2=v2`, form-encoding keys and values.
    ///
    /// Parameters with an empty value are left out. If nothing remains the
    /// result is the empty string, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in self.iter().filter(|(_, v)| !v.is_empty()) {
            serializer.append_pair(key, value);
            any = true;
        }

        if any {
            format!("?{}", serializer.finish())
        } else {
            String::new()
        }
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Paging and filter options shared by every operation.
///
/// Defaults: first page, ten results per page, no offset, no filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: i32,
    /// Results per page.
    pub per_page: i32,
    /// Number of results to skip.
    pub offset: i32,
    /// Only restrooms flagged as ADA accessible.
    pub ada: bool,
    /// Only unisex restrooms.
    pub unisex: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            offset: 0,
            ada: false,
            unisex: false,
        }
    }
}

impl ListOptions {
    /// Creates options with the default paging and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    fn options_mut(&mut self) -> &mut ListOptions {
        self
    }

    fn write_to(&self, params: &mut QueryParams) {
        params.insert("page", self.page);
        params.insert("per_page", self.per_page);
        params.insert("offset", self.offset);
        params.insert_flag("ada", self.ada);
        params.insert_flag("unisex", self.unisex);
    }
}

macro_rules! list_option_setters {
    ($ty:ty) => {
        impl $ty {
            /// Sets the 1-based page number.
            pub fn page(mut self, page: i32) -> Self {
                self.options_mut().page = page;
                self
            }

            /// Sets the number of results per page.
            pub fn per_page(mut self, per_page: i32) -> Self {
                self.options_mut().per_page = per_page;
                self
            }

            /// Sets the number of results to skip.
            pub fn offset(mut self, offset: i32) -> Self {
                self.options_mut().offset = offset;
                self
            }

            /// Restricts results to ADA accessible restrooms.
            pub fn ada(mut self, ada: bool) -> Self {
                self.options_mut().ada = ada;
                self
            }

            /// Restricts results to unisex restrooms.
            pub fn unisex(mut self, unisex: bool) -> Self {
                self.options_mut().unisex = unisex;
                self
            }

            /// Replaces all paging and filter options at once.
            pub fn options(mut self, options: ListOptions) -> Self {
                *self.options_mut() = options;
                self
            }
        }
    };
}

list_option_setters!(ListOptions);
list_option_setters!(DateQuery);
list_option_setters!(LocationQuery);
list_option_setters!(SearchQuery);

/// Input of [`RestroomClient::get_by_date`](crate::RestroomClient::get_by_date).
///
/// The date is not validated; the server decides what to do with, say, month 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateQuery {
    /// Day of month.
    pub day: i32,
    /// Month, 1 to 12.
    pub month: i32,
    /// Four-digit year.
    pub year: i32,
    /// Include restrooms updated (not only created) since the date.
    pub updated: bool,
    /// Paging and filters.
    pub list: ListOptions,
}

impl DateQuery {
    /// Creates a query for restrooms since `day`/`month`/`year`.
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Self {
            day,
            month,
            year,
            updated: false,
            list: ListOptions::default(),
        }
    }

    /// Also match restrooms updated since the date.
    pub fn updated(mut self, updated: bool) -> Self {
        self.updated = updated;
        self
    }

    fn options_mut(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl From<&DateQuery> for QueryParams {
    fn from(query: &DateQuery) -> Self {
        let mut params = QueryParams::new();
        query.list.write_to(&mut params);
        params.insert("day", query.day);
        params.insert("month", query.month);
        params.insert("year", query.year);
        params.insert_flag("updated", query.updated);
        params
    }
}

/// Input of [`RestroomClient::get_by_location`](crate::RestroomClient::get_by_location).
///
/// Coordinates are forwarded without range checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationQuery {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Paging and filters.
    pub list: ListOptions,
}

impl LocationQuery {
    /// Creates a query for restrooms near `lat`/`lng`.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            list: ListOptions::default(),
        }
    }

    fn options_mut(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl From<&LocationQuery> for QueryParams {
    fn from(query: &LocationQuery) -> Self {
        let mut params = QueryParams::new();
        query.list.write_to(&mut params);
        params.insert("lat", query.lat);
        params.insert("lng", query.lng);
        params
    }
}

/// Input of [`RestroomClient::search`](crate::RestroomClient::search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text, stored unencoded.
    pub query: String,
    /// Paging and filters.
    pub list: ListOptions,
}

impl SearchQuery {
    /// Creates a free-text search.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            list: ListOptions::default(),
        }
    }

    fn options_mut(&mut self) -> &mut ListOptions {
        &mut self.list
    }
}

impl From<&SearchQuery> for QueryParams {
    fn from(query: &SearchQuery) -> Self {
        let mut params = QueryParams::new();
        query.list.write_to(&mut params);
        params.insert("query", &query.query);
        params
    }
}

impl From<&ListOptions> for QueryParams {
    fn from(options: &ListOptions) -> Self {
        let mut params = QueryParams::new();
        options.write_to(&mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_serialize_to_empty_string() {
        assert_eq!(QueryParams::new().to_query_string(), "");
    }

    #[test]
    fn test_only_empty_values_serialize_to_empty_string() {
        let params = QueryParams::new().with("query", "");
        assert_eq!(params.len(), 1);
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let params = QueryParams::new().with("a", "1").with("b", "").with("c", "3");
        assert_eq!(params.to_query_string(), "?a=1&c=3");
    }

    #[test]
    fn test_list_defaults_always_present() {
        let params = QueryParams::from(&ListOptions::default());
        assert_eq!(params.to_query_string(), "?offset=0&page=1&per_page=10");
    }

    #[test]
    fn test_flags_only_when_set() {
        for (ada, unisex) in [(false, false), (true, false), (false, true), (true, true)] {
            let params = QueryParams::from(&ListOptions::new().ada(ada).unisex(unisex));
            assert_eq!(params.get("ada"), ada.then_some("true"));
            assert_eq!(params.get("unisex"), unisex.then_some("true"));
        }
    }

    #[test]
    fn test_date_query_params() {
        let query = DateQuery::new(31, 2, 2024).updated(true).page(3).per_page(50);
        let params = QueryParams::from(&query);

        assert_eq!(params.get("day"), Some("31"));
        assert_eq!(params.get("month"), Some("2"));
        assert_eq!(params.get("year"), Some("2024"));
        assert_eq!(params.get("updated"), Some("true"));
        assert_eq!(params.get("page"), Some("3"));
        assert_eq!(params.get("per_page"), Some("50"));
        assert_eq!(params.get("offset"), Some("0"));
        assert!(!params.contains("ada"));
    }

    #[test]
    fn test_out_of_range_values_are_forwarded() {
        let query = DateQuery::new(0, 13, -1).page(-2).per_page(0).offset(-5);
        let params = QueryParams::from(&query);

        assert_eq!(params.get("day"), Some("0"));
        assert_eq!(params.get("month"), Some("13"));
        assert_eq!(params.get("year"), Some("-1"));
        assert_eq!(params.get("page"), Some("-2"));
        assert_eq!(params.get("per_page"), Some("0"));
        assert_eq!(params.get("offset"), Some("-5"));
    }

    #[test]
    fn test_date_query_without_updated() {
        let params = QueryParams::from(&DateQuery::new(1, 1, 2020));
        assert!(!params.contains("updated"));
    }

    #[test]
    fn test_location_query_params() {
        let query = LocationQuery::new(45.5231, -122.6765).unisex(true);
        let params = QueryParams::from(&query);

        assert_eq!(params.get("lat"), Some("45.5231"));
        assert_eq!(params.get("lng"), Some("-122.6765"));
        assert_eq!(params.get("unisex"), Some("true"));
        assert!(!params.contains("updated"));
    }

    #[test]
    fn test_search_query_is_encoded_once() {
        let params = QueryParams::from(&SearchQuery::new("a b"));
        assert_eq!(params.get("query"), Some("a b"));

        let query_string = params.to_query_string();
        assert!(query_string.contains("query=a+b"));
        assert!(!query_string.contains(' '));
        assert!(!query_string.contains("%2520"));
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let params = QueryParams::new().with("query", "tea & café=1");
        assert_eq!(
            params.to_query_string(),
            "?query=tea+%26+caf%C3%A9%3D1"
        );
    }

    #[test]
    fn test_options_replaces_all() {
        let options = ListOptions::new().page(4).offset(20).ada(true);
        let query = SearchQuery::new("park").unisex(true).options(options);
        assert_eq!(query.list, options);
    }

    #[test]
    fn test_from_iterator() {
        let params: QueryParams = [("page", 1), ("offset", 0)].into_iter().collect();
        assert_eq!(params.to_query_string(), "?offset=0&page=1");
    }
}
