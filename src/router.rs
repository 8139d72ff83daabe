//! The deep-link router.
//!
//! [`DeepLinkRouter`] composes the leaf components into one navigation
//! engine: the matcher resolves paths against the route tree, the history
//! records them, the breadcrumb builder derives the ancestor trail, and the
//! tab bridge carries the tab-per-route presentation policy. Three
//! [`Observable`] outputs — current path, current match, breadcrumb trail —
//! are what view collaborators subscribe to.
//!
//! # Ordering
//!
//! Every navigation performs, synchronously and in this order: route
//! resolution → history update → breadcrumb rebuild → stream emissions.
//! Nothing can observe a partially-updated router.
//!
//! # Reentrancy
//!
//! Two feedback cycles are possible and both are broken here:
//!
//! - Activating a tab changes the bridge's active-tab value, whose
//!   subscription navigates the router, which may activate a tab. The cycle
//!   terminates because navigating to the path already under the history
//!   cursor is a strict no-op (no mutation, no emission).
//! - Consuming a deep link can trigger the host's URL-change handling,
//!   which may hand the URL right back. A plain boolean guard suppresses
//!   the nested call; single-threaded execution makes the flag sufficient.

use crate::breadcrumbs::{build_breadcrumbs, BreadcrumbItem};
#[cfg(feature = "cache")]
use crate::cache::{CacheStats, MatchCache};
use crate::deeplink::{create_deep_link, DeepLinkOptions, DeepLinkParams};
use crate::error::NavigationOutcome;
use crate::history::NavigationHistory;
use crate::matcher::{match_route, RouteMatch};
use crate::observe::Observable;
use crate::path::normalize_path;
use crate::route::Route;
use crate::tabs::{TabBridge, TabSpec};
use crate::{debug_log, trace_log, warn_log};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// What the router does with a successfully matched path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Every match opens or activates a dedicated tab; history is updated
    /// through the tab bridge's active-tab notification. The reference
    /// behavior for tabbed hosts.
    #[default]
    TabPerRoute,
    /// Every match updates history in place; tabs are only touched through
    /// explicit [`DeepLinkRouter::open_in_tab`] calls.
    InPlace,
}

/// Per-call navigation options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// Override the router's [`NavigationPolicy`] for this call.
    pub open_in_tab: Option<bool>,
    /// JSON object merged into the router's navigation state; also attached
    /// as tab data when the call opens a tab.
    pub state: Option<Value>,
}

impl NavigateOptions {
    /// Default options: push, policy decides presentation, no state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current history entry instead of pushing.
    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }

    /// Force tab (or in-place) presentation for this call.
    pub fn open_in_tab(mut self, open_in_tab: bool) -> Self {
        self.open_in_tab = Some(open_in_tab);
        self
    }

    /// Attach navigation state.
    pub fn state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }
}

/// Options for [`DeepLinkRouter::open_in_tab`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTabOptions {
    /// The path to resolve and show.
    pub path: String,
    /// Tab title; defaults to the matched route's title.
    pub title: Option<String>,
    /// Whether the tab may be closed. Defaults to `true`.
    pub closable: bool,
    /// Payload to attach to the tab.
    pub data: Option<Value>,
}

impl OpenTabOptions {
    /// Open a tab for the given path with default settings.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            closable: true,
            data: None,
        }
    }

    /// Override the tab title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
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

struct RouterShared {
    routes: Vec<Arc<Route>>,
    policy: NavigationPolicy,
    tabs: Rc<dyn TabBridge>,
    history: RefCell<NavigationHistory>,
    #[cfg(feature = "cache")]
    cache: RefCell<MatchCache>,
    nav_state: RefCell<Map<String, Value>>,
    current_path: Observable<String>,
    current_route: Observable<Option<RouteMatch>>,
    breadcrumbs: Observable<Vec<BreadcrumbItem>>,
    processing_deep_link: Cell<bool>,
}

/// The navigation engine. See the [module docs](self) for the contract.
///
/// Cheap to clone; clones share all state.
///
/// # Example
///
/// ```
/// use deeplink_router::{DeepLinkRouter, NavigationPolicy, Route};
/// # use deeplink_router::{Observable, Tab, TabBridge, TabId, TabSpec};
/// # struct NoTabs(Observable<Option<Tab>>);
/// # impl TabBridge for NoTabs {
/// #     fn find_tab_by_route(&self, _: &str) -> Option<Tab> { None }
/// #     fn open_tab(&self, spec: TabSpec) -> Tab {
/// #         Tab { id: TabId::new("t"), title: spec.title, route: spec.route,
/// #               closable: spec.closable, data: spec.data }
/// #     }
/// #     fn activate_tab(&self, _: &TabId) -> bool { true }
/// #     fn active_tab(&self) -> Observable<Option<Tab>> { self.0.clone() }
/// # }
/// # let bridge = std::rc::Rc::new(NoTabs(Observable::new(None)));
///
/// let routes = vec![
///     Route::new("/", "Home").exact(),
///     Route::new("/users", "Users").child(Route::new("/:id", "User Detail")),
/// ];
/// let router = DeepLinkRouter::with_policy(routes, bridge, NavigationPolicy::InPlace);
///
/// let outcome = router.navigate("/users/42", Default::default());
/// assert!(outcome.is_success());
/// assert_eq!(router.current_path().get(), "/users/42");
///
/// let trail = router.get_breadcrumbs();
/// assert_eq!(trail.last().unwrap().title, "User Detail");
/// ```
pub struct DeepLinkRouter {
    shared: Rc<RouterShared>,
}

impl Clone for DeepLinkRouter {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl DeepLinkRouter {
    /// Create a router with the default [`NavigationPolicy::TabPerRoute`].
    pub fn new(routes: Vec<Route>, tabs: Rc<dyn TabBridge>) -> Self {
        Self::with_policy(routes, tabs, NavigationPolicy::default())
    }

    /// Create a router with an explicit presentation policy.
    ///
    /// The route tree is taken by value and frozen: it is shared read-only
    /// for the router's lifetime.
    pub fn with_policy(
        routes: Vec<Route>,
        tabs: Rc<dyn TabBridge>,
        policy: NavigationPolicy,
    ) -> Self {
        let shared = Rc::new(RouterShared {
            routes: routes.into_iter().map(Arc::new).collect(),
            policy,
            tabs,
            history: RefCell::new(NavigationHistory::new()),
            #[cfg(feature = "cache")]
            cache: RefCell::new(MatchCache::new()),
            nav_state: RefCell::new(Map::new()),
            current_path: Observable::new("/".to_string()),
            current_route: Observable::new(None),
            breadcrumbs: Observable::new(Vec::new()),
            processing_deep_link: Cell::new(false),
        });

        // Keep router state in sync when tab selection changes without
        // going through the router. The weak reference avoids a cycle; the
        // same-path guard in navigate_internal stops the feedback loop.
        let weak: Weak<RouterShared> = Rc::downgrade(&shared);
        shared
            .tabs
            .active_tab()
            .subscribe(move |tab| {
                let (Some(shared), Some(tab)) = (weak.upgrade(), tab.as_ref()) else {
                    return;
                };
                trace_log!("active tab changed to '{}'", tab.route);
                match shared.resolve(&tab.route) {
                    Some(m) => {
                        shared.navigate_internal(&m, &tab.route, false);
                    }
                    None => warn_log!("active tab route '{}' does not resolve", tab.route),
                }
            })
            .detach();

        Self { shared }
    }

    /// The declared route tree.
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.shared.routes
    }

    /// Resolve `path` and apply it according to the navigation policy.
    ///
    /// A resolved path is routed through a tab under
    /// [`NavigationPolicy::TabPerRoute`] (or when `options.open_in_tab`
    /// forces it) and through the history otherwise. An unresolved path
    /// still moves the history and streams — with an empty match — so
    /// navigation state never silently freezes; the `NotFound` outcome
    /// tells the caller to present a fallback.
    pub fn navigate(&self, path: &str, options: NavigateOptions) -> NavigationOutcome {
        if let Some(state) = &options.state {
            self.shared.merge_state(state);
        }

        let Some(m) = self.shared.resolve(path) else {
            warn_log!("no route matched '{}'", path);
            return self.shared.apply_unmatched(path, options.replace);
        };

        let use_tab = options
            .open_in_tab
            .unwrap_or(self.shared.policy == NavigationPolicy::TabPerRoute);

        if use_tab {
            let mut tab_options = OpenTabOptions::new(path);
            if let Some(state) = options.state {
                tab_options = tab_options.data(state);
            }
            self.open_in_tab(tab_options)
        } else {
            debug_log!("navigating in place to '{}'", m.path);
            if self.shared.navigate_internal(&m, path, options.replace) {
                NavigationOutcome::Navigated {
                    path: normalize_path(path).into_owned(),
                }
            } else {
                NavigationOutcome::Unchanged
            }
        }
    }

    /// Open (or re-activate) a tab for the given path.
    ///
    /// Dedup rule: tabs are keyed by the full normalized path, and if the
    /// tab manager already has a tab for it, that tab is activated instead
    /// of creating a duplicate — at most one tab per route path. Router
    /// state is synced either by the bridge's active-tab notification or,
    /// when the bridge stays silent (tab already active), by the router
    /// itself; the same-path guard makes the two converge on exactly one
    /// update.
    pub fn open_in_tab(&self, options: OpenTabOptions) -> NavigationOutcome {
        let normalized = normalize_path(&options.path).into_owned();

        let Some(m) = self.shared.resolve(&normalized) else {
            warn_log!("no route matched '{}', not opening a tab", normalized);
            return NavigationOutcome::NotFound { path: normalized };
        };

        let tab = match self.shared.tabs.find_tab_by_route(&normalized) {
            Some(existing) => {
                debug_log!("reusing tab '{}' for '{}'", existing.id, normalized);
                self.shared.tabs.activate_tab(&existing.id);
                existing
            }
            None => {
                let title = options.title.unwrap_or_else(|| m.route.title.clone());
                let mut spec = TabSpec::new(&normalized, title).closable(options.closable);
                if let Some(data) = options.data {
                    spec = spec.data(data);
                }
                debug_log!("opening tab for '{}'", normalized);
                self.shared.tabs.open_tab(spec)
            }
        };

        // The active-tab subscription usually synced us already; no-op then.
        self.shared.navigate_internal(&m, &normalized, false);

        NavigationOutcome::OpenedTab {
            path: normalized,
            tab: tab.id,
        }
    }

    /// Move back one history entry, re-resolve, and re-emit. `Unchanged`
    /// when already at the oldest entry.
    pub fn go_back(&self) -> NavigationOutcome {
        let event = self.shared.history.borrow_mut().back();
        match event {
            Some(event) => self.shared.apply_cursor_move(&event.to),
            None => NavigationOutcome::Unchanged,
        }
    }

    /// Move forward one history entry, re-resolve, and re-emit. `Unchanged`
    /// when already at the newest entry.
    pub fn go_forward(&self) -> NavigationOutcome {
        let event = self.shared.history.borrow_mut().forward();
        match event {
            Some(event) => self.shared.apply_cursor_move(&event.to),
            None => NavigationOutcome::Unchanged,
        }
    }

    /// `true` if [`go_back`](Self::go_back) would move.
    pub fn can_go_back(&self) -> bool {
        self.shared.history.borrow().can_go_back()
    }

    /// `true` if [`go_forward`](Self::go_forward) would move.
    pub fn can_go_forward(&self) -> bool {
        self.shared.history.borrow().can_go_forward()
    }

    /// Snapshot of the history entries, oldest first.
    pub fn history_entries(&self) -> Vec<String> {
        self.shared.history.borrow().entries().to_vec()
    }

    /// The current path as a reactive value.
    pub fn current_path(&self) -> Observable<String> {
        self.shared.current_path.clone()
    }

    /// The current route match as a reactive value (`None` when the current
    /// path did not resolve).
    pub fn current_route(&self) -> Observable<Option<RouteMatch>> {
        self.shared.current_route.clone()
    }

    /// The breadcrumb trail as a reactive value.
    pub fn breadcrumbs(&self) -> Observable<Vec<BreadcrumbItem>> {
        self.shared.breadcrumbs.clone()
    }

    /// Synchronous snapshot of the breadcrumb trail.
    pub fn get_breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        self.shared.breadcrumbs.get()
    }

    /// Accumulated navigation state (merged from deep links and
    /// [`NavigateOptions::state`]).
    pub fn navigation_state(&self) -> Map<String, Value> {
        self.shared.nav_state.borrow().clone()
    }

    /// Serialize a deep link for `path` with the given options.
    pub fn create_deep_link(&self, path: &str, options: &DeepLinkOptions) -> String {
        create_deep_link(path, options)
    }

    /// Consume a deep-link URL: decode its recognized parameters, apply
    /// them (state merge, presentation, history mode), navigate, and return
    /// the outcome together with the rewritten URL the host should display
    /// — recognized keys removed, so re-processing is a no-op.
    ///
    /// Returns `None` when a deep link is already being processed; the
    /// nested invocation (host URL-change feedback) is suppressed.
    pub fn handle_deep_link(&self, url: &str) -> Option<(NavigationOutcome, String)> {
        if self.shared.processing_deep_link.get() {
            trace_log!("deep link '{}' ignored, already processing one", url);
            return None;
        }
        self.shared.processing_deep_link.set(true);

        let (params, rewritten) = DeepLinkParams::extract(url);
        if let Some(source) = &params.source {
            debug_log!("consuming deep link from source '{}'", source);
        }

        let mut options = NavigateOptions::new();
        if !params.preserve_history {
            options = options.replace();
        }
        if params.open_in_tab {
            options = options.open_in_tab(true);
        }
        if let Some(state) = params.state {
            options = options.state(state);
        }

        let outcome = self.navigate(&rewritten, options);

        self.shared.processing_deep_link.set(false);
        Some((outcome, rewritten))
    }

    /// Hit/miss counters of the route-resolution cache.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.shared.cache.borrow().stats()
    }
}

impl RouterShared {
    /// Resolve a path against the route tree, consulting the cache first.
    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        #[cfg(feature = "cache")]
        {
            let key = normalize_path(path).into_owned();
            if let Some(hit) = self.cache.borrow_mut().get(&key) {
                return Some(hit);
            }
            let resolved = match_route(path, &self.routes);
            if let Some(m) = &resolved {
                self.cache.borrow_mut().put(key, m.clone());
            }
            resolved
        }
        #[cfg(not(feature = "cache"))]
        {
            match_route(path, &self.routes)
        }
    }

    /// The ordered core of every navigation: same-path guard, history
    /// update, breadcrumb rebuild, stream emissions. Returns `false` when
    /// the guard made it a no-op.
    ///
    /// No `RefCell` borrow is held across the emissions, so subscribers may
    /// call back into the router.
    fn navigate_internal(&self, m: &RouteMatch, full_path: &str, replace: bool) -> bool {
        let normalized = normalize_path(full_path).into_owned();

        {
            let history = self.history.borrow();
            if history.current() == Some(normalized.as_str()) {
                trace_log!("'{}' is already current, skipping", normalized);
                return false;
            }
        }

        {
            let mut history = self.history.borrow_mut();
            if replace {
                history.replace(normalized.clone());
            } else {
                history.push(normalized.clone());
            }
        }

        let trail = build_breadcrumbs(&self.routes, &m.route, &m.params, &m.path);

        self.current_path.set(normalized);
        self.current_route.set(Some(m.clone()));
        self.breadcrumbs.set(trail);

        true
    }

    /// Record an unmatched path so navigation state does not freeze: the
    /// history and path stream move, the match stream goes empty, and the
    /// trail clears.
    fn apply_unmatched(&self, path: &str, replace: bool) -> NavigationOutcome {
        let normalized = normalize_path(path).into_owned();

        {
            let history = self.history.borrow();
            if history.current() == Some(normalized.as_str()) {
                return NavigationOutcome::Unchanged;
            }
        }

        {
            let mut history = self.history.borrow_mut();
            if replace {
                history.replace(normalized.clone());
            } else {
                history.push(normalized.clone());
            }
        }

        self.current_path.set(normalized.clone());
        self.current_route.set(None);
        self.breadcrumbs.set(Vec::new());

        NavigationOutcome::NotFound { path: normalized }
    }

    /// After `back`/`forward` moved the cursor, re-resolve the entry now
    /// under it and re-emit all streams.
    fn apply_cursor_move(&self, path: &str) -> NavigationOutcome {
        match self.resolve(path) {
            Some(m) => {
                let trail = build_breadcrumbs(&self.routes, &m.route, &m.params, &m.path);
                self.current_path.set(path.to_string());
                self.current_route.set(Some(m));
                self.breadcrumbs.set(trail);
                NavigationOutcome::Navigated {
                    path: path.to_string(),
                }
            }
            None => {
                warn_log!("history entry '{}' no longer resolves", path);
                self.current_path.set(path.to_string());
                self.current_route.set(None);
                self.breadcrumbs.set(Vec::new());
                NavigationOutcome::NotFound {
                    path: path.to_string(),
                }
            }
        }
    }

    /// Merge a JSON object into the navigation state. Non-object values are
    /// rejected with a warning — the deep-link contract says object.
    fn merge_state(&self, state: &Value) {
        match state {
            Value::Object(entries) => {
                let mut nav_state = self.nav_state.borrow_mut();
                for (key, value) in entries {
                    nav_state.insert(key.clone(), value.clone());
                }
            }
            other => warn_log!("ignoring non-object navigation state: {}", other),
        }
    }
}

impl std::fmt::Debug for DeepLinkRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLinkRouter")
            .field("policy", &self.shared.policy)
            .field("routes", &self.shared.routes.len())
            .field("history", &self.shared.history.borrow().len())
            .finish_non_exhaustive()
    }
}
