//! Path utilities: normalization, segment splitting, parameter extraction,
//! and percent encoding.
//!
//! Everything in this module is pure string manipulation with no failure
//! mode other than an explicit `None`. The rest of the crate builds on these
//! primitives: the matcher pairs pattern segments against path segments, the
//! breadcrumb builder substitutes parameter values back into patterns, and
//! the deep-link codec percent-encodes query components.
//!
//! # Normalization rules
//!
//! 1. Empty paths normalize to `"/"` (root)
//! 2. A leading slash is ensured (`"dashboard"` → `"/dashboard"`)
//! 3. Trailing slashes are removed, except for the root `"/"`
//! 4. Repeated slashes collapse to one (`"//dashboard"` → `"/dashboard"`)
//! 5. A `?query` suffix is preserved verbatim; only the path part is touched

use crate::params::RouteParams;
use std::borrow::Cow;

/// Strip leading and trailing slashes from a path or pattern segment.
///
/// This pattern appears throughout the crate. Centralizing it ensures
/// consistency and makes call sites more readable.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Split a path into its path and query parts at the first `?`.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::split_query;
///
/// assert_eq!(split_query("/users/42?tab=orders"), ("/users/42", Some("tab=orders")));
/// assert_eq!(split_query("/users/42"), ("/users/42", None));
/// ```
#[must_use]
pub fn split_query(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    }
}

/// Normalize a path for consistent comparison.
///
/// Ensures a leading slash and no trailing slash (unless root). A query
/// string, if present, is carried through untouched. Returns `Cow<str>` to
/// avoid allocation when the path is already normalized — this sits on the
/// hot path of every navigation.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::normalize_path;
///
/// assert_eq!(normalize_path("/dashboard"), "/dashboard");
/// assert_eq!(normalize_path("dashboard"), "/dashboard");
/// assert_eq!(normalize_path("/dashboard/"), "/dashboard");
/// assert_eq!(normalize_path("//dashboard"), "/dashboard");
/// assert_eq!(normalize_path("/"), "/");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("/users/42?tab=orders"), "/users/42?tab=orders");
/// ```
#[must_use]
pub fn normalize_path(path: &'_ str) -> Cow<'_, str> {
    let (path_part, query) = split_query(path);

    let normalized = normalize_path_part(path_part);

    match (normalized, query) {
        (n, None) => n,
        // Path part came through untouched: the whole input is normalized.
        (n, Some(_)) if n == path_part => Cow::Borrowed(path),
        (n, Some(q)) => Cow::Owned(format!("{n}?{q}")),
    }
}

fn normalize_path_part(path: &'_ str) -> Cow<'_, str> {
    if path.is_empty() || path == "/" {
        return Cow::Borrowed("/");
    }

    let has_leading = path.starts_with('/');
    let has_trailing = path.ends_with('/');
    let has_doubled = path.contains("//");

    // Already normalized: leading slash, no trailing, no repeats
    if has_leading && !has_trailing && !has_doubled {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Split a path into segments, filtering empty segments.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::split_path;
///
/// assert_eq!(split_path("/users/123"), vec!["users", "123"]);
/// assert_eq!(split_path("/"), Vec::<&str>::new());
/// assert_eq!(split_path("/users/"), vec!["users"]);
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Return `true` if the pattern contains a `:name` parameter segment.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::has_params;
///
/// assert!(has_params("/users/:id"));
/// assert!(!has_params("/users/list"));
/// ```
#[must_use]
pub fn has_params(pattern: &str) -> bool {
    split_path(pattern).iter().any(|s| s.starts_with(':'))
}

/// Match a path against a pattern, extracting `:name` parameter values.
///
/// Segments are paired positionally. A `:name` pattern segment captures the
/// corresponding path segment (percent-decoded) under `name`; a literal
/// pattern segment must match the path segment exactly. If the path has
/// fewer segments than the pattern, there is no match. Extra path segments
/// beyond the pattern are permitted — an interior route accepts any path
/// underneath it, and [`Route::exact`](crate::Route) is what forbids that
/// for literal leaf patterns.
///
/// `None` is the no-match outcome. This function never panics.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::extract_params;
///
/// let params = extract_params("/users/42/orders/7", "/users/:id/orders/:orderId").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// assert_eq!(params.get("orderId"), Some(&"7".to_string()));
///
/// // Path runs out of segments before the pattern: no match
/// assert!(extract_params("/users/42", "/users/:id/orders/:orderId").is_none());
///
/// // Literal mismatch: no match
/// assert!(extract_params("/teams/42", "/users/:id").is_none());
/// ```
#[must_use]
pub fn extract_params(path: &str, pattern: &str) -> Option<RouteParams> {
    let path_segments = split_path(split_query(path).0);
    let pattern_segments = split_path(pattern);

    if path_segments.len() < pattern_segments.len() {
        return None;
    }

    let mut params = RouteParams::new();

    for (pattern_seg, path_seg) in pattern_segments.iter().zip(path_segments.iter()) {
        if let Some(name) = pattern_seg.strip_prefix(':') {
            params.insert(name.to_string(), decode_uri_component(path_seg));
        } else if pattern_seg != path_seg {
            return None;
        }
    }

    Some(params)
}

/// Substitute parameter values into a pattern's `:name` tokens.
///
/// Returns the substituted path and `true` when every token was resolved.
/// A token with no value in `params` is left in place as the literal
/// `:name` text — the caller treats that as a data-integrity warning, not
/// a failure, because a missing label must not break navigation.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::substitute_params;
/// use deeplink_router::RouteParams;
///
/// let mut params = RouteParams::new();
/// params.insert("id".to_string(), "42".to_string());
///
/// assert_eq!(substitute_params("/users/:id", &params), ("/users/42".to_string(), true));
/// assert_eq!(substitute_params("/teams/:teamId", &params), ("/teams/:teamId".to_string(), false));
/// ```
#[must_use]
pub fn substitute_params(pattern: &str, params: &RouteParams) -> (String, bool) {
    let mut resolved = true;

    let segments: Vec<String> = split_path(pattern)
        .into_iter()
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                match params.get(name) {
                    Some(value) => value.clone(),
                    None => {
                        resolved = false;
                        segment.to_string()
                    }
                }
            } else {
                segment.to_string()
            }
        })
        .collect();

    if segments.is_empty() {
        ("/".to_string(), resolved)
    } else {
        (format!("/{}", segments.join("/")), resolved)
    }
}

/// Combine a base path and a child pattern into a full pattern.
///
/// An empty child leaves the base untouched (index-route convention), so a
/// child can never end up sharing a normalized path with its parent by
/// accident.
///
/// # Examples
///
/// ```
/// use deeplink_router::path::join_paths;
///
/// assert_eq!(join_paths("/dashboard", "settings"), "/dashboard/settings");
/// assert_eq!(join_paths("/", "/users/:id"), "/users/:id");
/// assert_eq!(join_paths("/dashboard", ""), "/dashboard");
/// ```
#[must_use]
pub fn join_paths(base: &str, child: &str) -> String {
    let base_trimmed = trim_slashes(base);
    let child_trimmed = trim_slashes(child);

    match (base_trimmed.is_empty(), child_trimmed.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{child_trimmed}"),
        (false, true) => format!("/{base_trimmed}"),
        (false, false) => format!("/{base_trimmed}/{child_trimmed}"),
    }
}

/// Percent-encode a URI component (RFC 3986 unreserved set passes through).
#[must_use]
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Percent-decode a URI component. `+` decodes to a space.
///
/// Invalid escape sequences are passed through literally rather than
/// rejected; a garbled parameter value is a cosmetic problem, a decode
/// failure mid-navigation is not.
#[must_use]
pub fn decode_uri_component(s: &str) -> String {
    fn hex_value(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    let input = s.as_bytes();
    let mut bytes = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'%' if i + 2 < input.len() => {
                match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        bytes.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        bytes.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            other => {
                bytes.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/dashboard"), "/dashboard");
        assert_eq!(normalize_path("dashboard"), "/dashboard");
        assert_eq!(normalize_path("/dashboard/"), "/dashboard");
        assert_eq!(normalize_path("//dashboard"), "/dashboard");
        assert_eq!(normalize_path("/a//b/"), "/a/b");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_normalize_path_keeps_query() {
        assert_eq!(normalize_path("/users/42?tab=orders"), "/users/42?tab=orders");
        assert_eq!(normalize_path("users/42/?tab=orders"), "/users/42?tab=orders");
        assert_eq!(normalize_path("?tab=orders"), "/?tab=orders");
        assert_eq!(normalize_path("//?tab=orders"), "/?tab=orders");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/users/123"), vec!["users", "123"]);
        assert_eq!(split_path("/"), Vec::<&str>::new());
        assert_eq!(split_path(""), Vec::<&str>::new());
        assert_eq!(split_path("/users/"), vec!["users"]);
        assert_eq!(split_path("users"), vec!["users"]);
    }

    #[test]
    fn test_has_params() {
        assert!(has_params("/users/:id"));
        assert!(has_params(":id"));
        assert!(!has_params("/users/list"));
        assert!(!has_params("/"));
    }

    #[test]
    fn test_extract_params_basic() {
        let params = extract_params("/users/42", "/users/:id").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_extract_params_multiple() {
        let params = extract_params("/users/42/orders/7", "/users/:id/orders/:orderId").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
        assert_eq!(params.get("orderId"), Some(&"7".to_string()));
    }

    #[test]
    fn test_extract_params_wrong_segment_count() {
        assert!(extract_params("/users/42", "/users/:id/orders/:orderId").is_none());
    }

    #[test]
    fn test_extract_params_literal_mismatch() {
        assert!(extract_params("/teams/42", "/users/:id").is_none());
    }

    #[test]
    fn test_extract_params_prefix_tolerance() {
        // A path may extend past the pattern; interior routes rely on this.
        let params = extract_params("/users/42/orders", "/users/:id").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_extract_params_decodes_values() {
        let params = extract_params("/search/hello%20world", "/search/:term").unwrap();
        assert_eq!(params.get("term"), Some(&"hello world".to_string()));
    }

    #[test]
    fn test_extract_params_ignores_query() {
        let params = extract_params("/users/42?tab=orders", "/users/:id").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_substitute_params() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "42".to_string());

        let (path, resolved) = substitute_params("/users/:id", &params);
        assert_eq!(path, "/users/42");
        assert!(resolved);
    }

    #[test]
    fn test_substitute_params_unresolved_token_kept() {
        let params = RouteParams::new();
        let (path, resolved) = substitute_params("/users/:id", &params);
        assert_eq!(path, "/users/:id");
        assert!(!resolved);
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/dashboard", "settings"), "/dashboard/settings");
        assert_eq!(join_paths("/dashboard", "/settings/"), "/dashboard/settings");
        assert_eq!(join_paths("/", "/users/:id"), "/users/:id");
        assert_eq!(join_paths("/dashboard", ""), "/dashboard");
        assert_eq!(join_paths("/", ""), "/");
    }

    #[test]
    fn test_uri_encoding() {
        assert_eq!(encode_uri_component("hello world"), "hello%20world");
        assert_eq!(encode_uri_component("a-b_c.d~e"), "a-b_c.d~e");
        assert!(encode_uri_component("test@example.com").contains("%40"));
    }

    #[test]
    fn test_uri_decoding() {
        assert_eq!(decode_uri_component("hello%20world"), "hello world");
        assert_eq!(decode_uri_component("hello+world"), "hello world");
        assert_eq!(decode_uri_component("100%"), "100%");
        assert_eq!(decode_uri_component("%zz"), "%zz");
    }

    #[test]
    fn test_uri_round_trip_utf8() {
        let input = "café & ünïcode";
        assert_eq!(decode_uri_component(&encode_uri_component(input)), input);
    }
}
