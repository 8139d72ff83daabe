//! Breadcrumb derivation.
//!
//! The breadcrumb trail is the root-to-matched-node ancestor chain of the
//! route tree, in declaration order, with each node's pattern substituted
//! with the current match's parameter values. It is re-derived from scratch
//! on every successful navigation — O(tree) per navigation buys statelessness
//! and freedom from parent back-references.
//!
//! The search is a pre-order DFS with an explicit accumulator: each visited
//! node pushes its item, and a branch that does not contain the target pops
//! it again before the next sibling is tried. The pop is the correctness
//! requirement — without it the trail keeps stale entries from rejected
//! branches.

use crate::params::RouteParams;
use crate::path::{join_paths, normalize_path, substitute_params};
use crate::route::Route;
use crate::warn_log;
use std::sync::Arc;

/// One link in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// The route's display title.
    pub title: String,
    /// Fully parameter-substituted path for this ancestor.
    pub path: String,
    /// `true` iff this item's path is the currently active path.
    pub active: bool,
}

/// Build the breadcrumb trail for `target` within the route tree.
///
/// `params` are the matched parameter values, substituted into each
/// ancestor's pattern; a `:name` token with no value is left in place as a
/// literal and logged as a warning — a missing label must not break the
/// navigation chain. `active_path` marks which item is the current one.
///
/// Target identity is pointer identity (`Arc::ptr_eq`) — the target must be
/// the node handed out by the matcher, not a structural copy. If the target
/// is not in the tree the result is empty.
///
/// # Example
///
/// ```
/// use deeplink_router::{build_breadcrumbs, match_route, Route};
///
/// let roots = vec![Route::new("/users", "Users")
///     .child(Route::new("/:id", "User Detail"))
///     .into_arc()];
///
/// let m = match_route("/users/42", &roots).unwrap();
/// let trail = build_breadcrumbs(&roots, &m.route, &m.params, &m.path);
///
/// let labels: Vec<_> = trail.iter().map(|b| (b.path.as_str(), b.active)).collect();
/// assert_eq!(labels, vec![("/users", false), ("/users/42", true)]);
/// ```
#[must_use]
pub fn build_breadcrumbs(
    roots: &[Arc<Route>],
    target: &Arc<Route>,
    params: &RouteParams,
    active_path: &str,
) -> Vec<BreadcrumbItem> {
    let active = normalize_path(active_path);
    let mut trail = Vec::new();

    for root in roots {
        if walk(root, "/", target, params, &active, &mut trail) {
            return trail;
        }
    }

    warn_log!("breadcrumb target '{}' not found in route tree", target.title);
    trail
}

/// Push this node's item, then search its subtree for the target. Pops the
/// item again when the target is not down this branch.
fn walk(
    node: &Arc<Route>,
    base: &str,
    target: &Arc<Route>,
    params: &RouteParams,
    active_path: &str,
    trail: &mut Vec<BreadcrumbItem>,
) -> bool {
    let pattern = join_paths(base, &node.path);
    let (full_path, resolved) = substitute_params(&pattern, params);

    if !resolved {
        warn_log!(
            "breadcrumb for route '{}' has unresolved parameter(s): '{}'",
            node.title,
            full_path
        );
    }

    trail.push(BreadcrumbItem {
        title: node.title.clone(),
        path: full_path.clone(),
        active: full_path == active_path,
    });

    if Arc::ptr_eq(node, target) {
        return true;
    }

    for child in &node.children {
        if walk(child, &full_path, target, params, active_path, trail) {
            return true;
        }
    }

    // Backtrack: this branch was rejected, drop its entry.
    trail.pop();
    false
}
