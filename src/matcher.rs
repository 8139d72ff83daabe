//! Route matching.
//!
//! [`match_route`] resolves a requested path against the declared route tree
//! with a pre-order depth-first search:
//!
//! - At each node, the node's pattern is joined onto its parent's to form
//!   the full pattern, and the *entire* input path is tested against it.
//! - A failed extraction prunes the node's whole subtree.
//! - On success, children are tried in declaration order against the same
//!   input path; the first matching child wins over the node itself
//!   (deepest match wins, first-declared sibling wins).
//! - If no node matches, the result is `None` — "no route for path" is a
//!   first-class outcome the caller handles, never a panic.
//!
//! Parameter extraction is prefix-tolerant (see
//! [`path::extract_params`](crate::path::extract_params)), which is what
//! lets an interior node admit descent into its children. A route marked
//! [`exact`](crate::Route::exact) with a literal-only pattern opts out of
//! that tolerance *for itself*: it can still host matching children, but it
//! only stands as the match when the normalized path equals its full
//! pattern. Without `exact`, a childless `/` root would swallow every path.
//!
//! Matching is pure: the same path and tree always produce the same result.

use crate::params::{QueryParams, RouteParams};
use crate::path::{extract_params, has_params, join_paths, normalize_path, split_query};
use crate::route::Route;
use crate::trace_log;
use std::sync::Arc;

/// Result of resolving a path against the route tree.
///
/// Derived data, owned transiently by the router: each navigation computes a
/// fresh match that supersedes the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The matched route node.
    pub route: Arc<Route>,
    /// Parameter values extracted from the path, keyed by `:name`.
    pub params: RouteParams,
    /// Parameters parsed from the path's query string.
    pub query: QueryParams,
    /// The normalized path (query stripped) that produced this match.
    pub path: String,
}

/// Match a path against the route tree.
///
/// Returns the deepest, first-declared match, or `None` when nothing in the
/// tree matches.
///
/// # Example
///
/// ```
/// use deeplink_router::{match_route, Route};
///
/// let roots = vec![Route::new("/users", "Users")
///     .child(Route::new("/:id", "User Detail"))
///     .into_arc()];
///
/// let m = match_route("/users/42?tab=orders", &roots).unwrap();
/// assert_eq!(m.route.title, "User Detail");
/// assert_eq!(m.params.get("id"), Some(&"42".to_string()));
/// assert_eq!(m.query.get("tab"), Some(&"orders".to_string()));
/// assert_eq!(m.path, "/users/42");
///
/// assert!(match_route("/nowhere", &roots).is_none());
/// ```
#[must_use]
pub fn match_route(path: &str, roots: &[Arc<Route>]) -> Option<RouteMatch> {
    let normalized = normalize_path(path);
    let (path_part, query_part) = split_query(&normalized);

    trace_log!(
        "matching '{}' against {} root route(s)",
        path_part,
        roots.len()
    );

    for root in roots {
        if let Some((route, params)) = match_node(root, "/", path_part) {
            trace_log!("'{}' matched route '{}'", path_part, route.title);
            return Some(RouteMatch {
                route,
                params,
                query: query_part.map(QueryParams::from_query_string).unwrap_or_default(),
                path: path_part.to_string(),
            });
        }
    }

    None
}

/// Try a single node and, on success, its children against the full input
/// path. Returns the deepest match found down this branch.
fn match_node(node: &Arc<Route>, base: &str, target: &str) -> Option<(Arc<Route>, RouteParams)> {
    let full_pattern = join_paths(base, &node.path);

    // Prune the subtree when the pattern doesn't hold for this path.
    let params = extract_params(target, &full_pattern)?;

    // Children are tried against the same full input path, in declaration
    // order. A matching child supersedes this node.
    for child in &node.children {
        if let Some(deeper) = match_node(child, &full_pattern, target) {
            return Some(deeper);
        }
    }

    // No child matched: the node itself is the match, unless it demands
    // exact equality and only prefix-matched.
    if node.exact && !has_params(&full_pattern) && full_pattern != target {
        return None;
    }

    Some((Arc::clone(node), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Arc<Route>> {
        vec![
            Route::new("/", "Home").exact().into_arc(),
            Route::new("/users", "Users")
                .child(
                    Route::new("/:id", "User Detail")
                        .child(Route::new("/orders/:orderId", "Order Detail")),
                )
                .into_arc(),
            Route::new("/about", "About").exact().into_arc(),
        ]
    }

    #[test]
    fn test_match_literal() {
        let m = match_route("/users", &tree()).unwrap();
        assert_eq!(m.route.title, "Users");
        assert!(m.params.is_empty());
        assert_eq!(m.path, "/users");
    }

    #[test]
    fn test_match_param_extraction() {
        let m = match_route("/users/42", &tree()).unwrap();
        assert_eq!(m.route.title, "User Detail");
        assert_eq!(m.params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_match_deepest_wins() {
        let m = match_route("/users/42/orders/7", &tree()).unwrap();
        assert_eq!(m.route.title, "Order Detail");
        assert_eq!(m.params.get("id"), Some(&"42".to_string()));
        assert_eq!(m.params.get("orderId"), Some(&"7".to_string()));
    }

    #[test]
    fn test_no_match_is_none() {
        assert!(match_route("/missing", &tree()).is_none());
        assert!(match_route("/users2", &tree()).is_none());
    }

    #[test]
    fn test_param_route_accepts_prefix() {
        // ":id" is not exact, so extra trailing segments still land on it.
        let m = match_route("/users/42/profile", &tree()).unwrap();
        assert_eq!(m.route.title, "User Detail");
    }

    #[test]
    fn test_exact_rejects_prefix() {
        assert_eq!(match_route("/about", &tree()).unwrap().route.title, "About");
        assert!(match_route("/about/team", &tree()).is_none());
    }

    #[test]
    fn test_exact_root_still_hosts_children() {
        let roots = vec![Route::new("/", "Home")
            .exact()
            .child(Route::new("/settings", "Settings"))
            .into_arc()];

        assert_eq!(match_route("/", &roots).unwrap().route.title, "Home");
        assert_eq!(
            match_route("/settings", &roots).unwrap().route.title,
            "Settings"
        );
        assert!(match_route("/other", &roots).is_none());
    }

    #[test]
    fn test_sibling_declaration_order_tie_break() {
        // Both children can match "/items/special"; first declared wins.
        let roots = vec![Route::new("/items", "Items")
            .child(Route::new("/:id", "By Id"))
            .child(Route::new("/special", "Special"))
            .into_arc()];

        let m = match_route("/items/special", &roots).unwrap();
        assert_eq!(m.route.title, "By Id");

        // Reversing declaration order reverses the winner.
        let roots = vec![Route::new("/items", "Items")
            .child(Route::new("/special", "Special"))
            .child(Route::new("/:id", "By Id"))
            .into_arc()];

        let m = match_route("/items/special", &roots).unwrap();
        assert_eq!(m.route.title, "Special");
    }

    #[test]
    fn test_match_is_deterministic() {
        let roots = tree();
        let a = match_route("/users/42", &roots).unwrap();
        let b = match_route("/users/42", &roots).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_parsed_into_match() {
        let m = match_route("/users/42?tab=orders&page=2", &tree()).unwrap();
        assert_eq!(m.query.get("tab"), Some(&"orders".to_string()));
        assert_eq!(m.query.get_as::<u32>("page"), Some(2));
        assert_eq!(m.path, "/users/42");
    }

    #[test]
    fn test_unnormalized_input() {
        let m = match_route("users/42/", &tree()).unwrap();
        assert_eq!(m.route.title, "User Detail");
        assert_eq!(m.path, "/users/42");
    }

    #[test]
    fn test_root_route_matches_root() {
        let m = match_route("/", &tree()).unwrap();
        assert_eq!(m.route.title, "Home");
    }
}
