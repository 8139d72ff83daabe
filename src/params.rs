//! Route parameter and query string containers.
//!
//! Two complementary types for working with URL data:
//!
//! - [`RouteParams`] — path parameters extracted from dynamic segments
//!   (e.g. `:id` in `/users/:id`). Keys are unique within a match. Supports
//!   typed access via [`get_as`](RouteParams::get_as) and parent-child
//!   merging via [`merge`](RouteParams::merge).
//! - [`QueryParams`] — query string parameters parsed from the
//!   `?key=value&...` portion of a path. Supports multi-valued keys
//!   (e.g. `?tag=a&tag=b`), typed access, and round-trip serialization.
//!
//! # Example
//!
//! ```
//! use deeplink_router::{RouteParams, QueryParams};
//!
//! // Path parameters from /users/42
//! let mut params = RouteParams::new();
//! params.insert("id".to_string(), "42".to_string());
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! // Query parameters from ?page=1&sort=name
//! let query = QueryParams::from_query_string("page=1&sort=name");
//! assert_eq!(query.get_as::<u32>("page"), Some(1));
//! assert_eq!(query.get("sort"), Some(&"name".to_string()));
//! ```

use crate::path::{decode_uri_component, encode_uri_component};
use std::collections::HashMap;

/// Path parameters extracted from a matched route pattern.
///
/// # Example
///
/// ```
/// use deeplink_router::RouteParams;
///
/// // Pattern: /users/:id, path: /users/123
/// let mut params = RouteParams::new();
/// params.insert("id".to_string(), "123".to_string());
///
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing `HashMap`.
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter. Keys are unique within a match.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get a reference to the underlying parameter map.
    pub fn all(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Merge parent parameters with child parameters.
    ///
    /// Child parameters override parent parameters on collision. Used when
    /// a nested match accumulates values down the route tree.
    ///
    /// # Example
    ///
    /// ```
    /// use deeplink_router::RouteParams;
    ///
    /// let mut parent = RouteParams::new();
    /// parent.insert("workspaceId".to_string(), "123".to_string());
    ///
    /// let mut child = RouteParams::new();
    /// child.insert("projectId".to_string(), "456".to_string());
    ///
    /// let merged = RouteParams::merge(&parent, &child);
    /// assert_eq!(merged.get("workspaceId"), Some(&"123".to_string()));
    /// assert_eq!(merged.get("projectId"), Some(&"456".to_string()));
    /// ```
    pub fn merge(parent: &RouteParams, child: &RouteParams) -> RouteParams {
        let mut merged = parent.clone();

        for (key, value) in child.iter() {
            merged.insert(key.clone(), value.clone());
        }

        merged
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from a path's query string.
///
/// Supports multiple values for the same key. Round-trip through
/// [`to_query_string`](Self::to_query_string) is exact for ASCII keys and
/// values; everything else is percent-encoded.
///
/// # Example
///
/// ```
/// use deeplink_router::QueryParams;
///
/// let query = QueryParams::from_query_string("page=1&tag=rust&tag=router");
///
/// assert_eq!(query.get("page"), Some(&"1".to_string()));
/// assert_eq!(query.get_all("tag").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string (the part after `?`).
    ///
    /// Pairs without `=` are treated as presence flags with an empty value,
    /// so `?preserveHistory` parses the same as `?preserveHistory=`.
    pub fn from_query_string(query: &str) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (decode_uri_component(k), decode_uri_component(v)),
                None => (decode_uri_component(pair), String::new()),
            };
            params.entry(key).or_default().push(value);
        }

        Self { params }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)?.first()
    }

    /// Get all values for a key.
    pub fn get_all(&self, key: &str) -> Option<&Vec<String>> {
        self.params.get(key)
    }

    /// Get the first value for a key, parsed as type `T`.
    ///
    /// Returns `None` if the key is missing or the value cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for the given key.
    ///
    /// If the key already exists, the new value is added to the list.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.entry(key).or_default().push(value);
    }

    /// Remove a key and all of its values, returning them if present.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.params.remove(key)
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over `(key, values)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.params.iter()
    }

    /// Serialize back into a query string.
    ///
    /// Key order is sorted so output is deterministic across runs; value
    /// order within a key is preserved.
    pub fn to_query_string(&self) -> String {
        let mut keys: Vec<&String> = self.params.keys().collect();
        keys.sort();

        let pairs: Vec<String> = keys
            .into_iter()
            .flat_map(|key| {
                self.params[key].iter().map(move |value| {
                    format!(
                        "{}={}",
                        encode_uri_component(key),
                        encode_uri_component(value)
                    )
                })
            })
            .collect();

        pairs.join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of unique parameter keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
