//! The tab manager contract.
//!
//! The router never stores tabs itself — tab storage belongs to the host
//! application's tab manager, and the router only talks to it through the
//! [`TabBridge`] trait. The bridge is injected into the router's
//! constructor; there is no ambient or global tab-manager lookup.
//!
//! Tabs reference routes by path string (lookup only, no ownership), and
//! the router's dedup rule guarantees at most one tab per route path: it
//! always checks [`find_tab_by_route`](TabBridge::find_tab_by_route) and
//! activates the existing tab instead of opening a duplicate.
//!
//! [`active_tab`](TabBridge::active_tab) is an [`Observable`] so the router
//! can keep its own path state in sync when the user switches tabs without
//! going through the router.

use crate::observe::Observable;
use serde_json::Value;
use std::fmt;

/// Opaque tab identifier, assigned by the tab manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabId(String);

impl TabId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tab as the router sees it. Owned by the tab manager; the router only
/// ever reads this surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Identifier assigned by the tab manager.
    pub id: TabId,
    /// Display title.
    pub title: String,
    /// The route path this tab shows.
    pub route: String,
    /// Whether the user may close the tab.
    pub closable: bool,
    /// Arbitrary payload attached at open time (e.g. deep-link state).
    pub data: Option<Value>,
}

/// Request to open a tab.
///
/// # Example
///
/// ```
/// use deeplink_router::TabSpec;
///
/// let spec = TabSpec::new("/users/42", "User 42")
///     .closable(false)
///     .data(serde_json::json!({"highlight": true}));
/// assert_eq!(spec.route, "/users/42");
/// assert!(!spec.closable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TabSpec {
    /// The route path the tab should show.
    pub route: String,
    /// Display title; the router defaults this to the matched route's title.
    pub title: String,
    /// Whether the user may close the tab. Defaults to `true`.
    pub closable: bool,
    /// Arbitrary payload to attach to the tab.
    pub data: Option<Value>,
}

impl TabSpec {
    /// Create a spec for the given route path and title.
    pub fn new(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
            closable: true,
            data: None,
        }
    }

    /// Set whether the tab can be closed.
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Attach a data payload.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// The contract the router consumes from the external tab manager.
pub trait TabBridge {
    /// Look up a tab by exact route-path equality.
    fn find_tab_by_route(&self, path: &str) -> Option<Tab>;

    /// Create (or reuse) storage for a tab and return it. Opening a tab is
    /// expected to also make it the active one.
    fn open_tab(&self, spec: TabSpec) -> Tab;

    /// Make an existing tab the active one. Returns `false` if the id is
    /// unknown.
    fn activate_tab(&self, id: &TabId) -> bool;

    /// The currently active tab as a reactive value. Always has a current
    /// value (`None` until any tab exists) and notifies on change.
    fn active_tab(&self) -> Observable<Option<Tab>>;
}
