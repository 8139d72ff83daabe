//! Route declarations.
//!
//! A [`Route`] is static configuration: a path pattern, a display title, an
//! `exact` flag, and an ordered list of children forming a tree. The tree is
//! built once at startup, shared as `Arc<Route>`, and never mutated — it is
//! the single source of truth for valid paths. Matches and breadcrumbs are
//! always derived from it, never stored alongside it.
//!
//! Child order is significant: when two siblings could both match a path,
//! the first-declared one wins.
//!
//! # Example
//!
//! ```
//! use deeplink_router::Route;
//!
//! let routes = Route::new("/", "Home")
//!     .child(
//!         Route::new("/users", "Users")
//!             .child(Route::new("/:id", "User Detail")),
//!     )
//!     .child(Route::new("/about", "About").exact());
//! ```

use crate::path::{join_paths, normalize_path};
use std::sync::Arc;

/// A single node in the declared route tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path pattern, relative to the parent route. May contain `:name`
    /// parameter segments, e.g. `/users/:id`.
    pub path: String,

    /// Display label. Also used as the default tab title when the route is
    /// opened in a tab.
    pub title: String,

    /// When `true` and the pattern contains no parameters, the route only
    /// matches the exact normalized path — prefix matches are rejected.
    pub exact: bool,

    /// Ordered child routes. Declaration order is the sibling tie-break.
    pub children: Vec<Arc<Route>>,
}

impl Route {
    /// Create a route with the given pattern and display title.
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            exact: false,
            children: Vec::new(),
        }
    }

    /// Require exact path equality for this route's literal pattern.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Append a child route.
    pub fn child(mut self, child: Route) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Replace the child list wholesale.
    pub fn children(mut self, children: Vec<Arc<Route>>) -> Self {
        self.children = children;
        self
    }

    /// Wrap this route in an `Arc` for sharing across the router.
    pub fn into_arc(self) -> Arc<Route> {
        Arc::new(self)
    }

    /// Return `true` if this route has child routes.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Find the route whose accumulated pattern equals `full_pattern`.
///
/// Walks the tree pre-order, joining each node's pattern onto its parent's,
/// and returns the first node whose full pattern (normalized) equals the
/// requested one. Pattern lookup, not path matching — `:id` only matches a
/// literal `:id` here.
///
/// # Example
///
/// ```
/// use deeplink_router::{find_route, Route};
///
/// let roots = vec![Route::new("/users", "Users")
///     .child(Route::new("/:id", "User Detail"))
///     .into_arc()];
///
/// let found = find_route(&roots, "/users/:id").unwrap();
/// assert_eq!(found.title, "User Detail");
/// assert!(find_route(&roots, "/teams").is_none());
/// ```
#[must_use]
pub fn find_route(roots: &[Arc<Route>], full_pattern: &str) -> Option<Arc<Route>> {
    let target = normalize_path(full_pattern);

    fn walk(node: &Arc<Route>, base: &str, target: &str) -> Option<Arc<Route>> {
        let full = join_paths(base, &node.path);
        if full == target {
            return Some(Arc::clone(node));
        }
        for child in &node.children {
            if let Some(found) = walk(child, &full, target) {
                return Some(found);
            }
        }
        None
    }

    roots.iter().find_map(|root| walk(root, "/", &target))
}
