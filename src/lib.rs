//! Deep-link navigation engine for tabbed applications.
//!
//! This crate is the pure data/control core of a client-side router: it
//! resolves paths against a declared route tree, keeps a back/forward
//! history, derives breadcrumb trails, encodes and consumes deep links, and
//! bridges navigation to a tab-per-route presentation policy. It renders
//! nothing and owns no tabs — views and the tab manager are external
//! collaborators reached through [`Observable`] outputs and the
//! [`TabBridge`] trait.
//!
//! # Pieces
//!
//! | Component | Role |
//! |-----------|------|
//! | [`Route`] | immutable declaration tree, the source of truth for paths |
//! | [`match_route`] | DFS resolution with params, pruning, and tie-breaks |
//! | [`NavigationHistory`] | stack + cursor with forward-branch truncation |
//! | [`build_breadcrumbs`] | backtracking derivation of the ancestor trail |
//! | [`TabBridge`] | injected contract to the host's tab manager |
//! | [`create_deep_link`] / [`DeepLinkParams`] | deep-link codec |
//! | [`DeepLinkRouter`] | the orchestrator tying it all together |
//!
//! # Example
//!
//! ```
//! use deeplink_router::{DeepLinkRouter, NavigateOptions, NavigationPolicy, Route};
//! # use deeplink_router::{Observable, Tab, TabBridge, TabId, TabSpec};
//! # struct NoTabs(Observable<Option<Tab>>);
//! # impl TabBridge for NoTabs {
//! #     fn find_tab_by_route(&self, _: &str) -> Option<Tab> { None }
//! #     fn open_tab(&self, spec: TabSpec) -> Tab {
//! #         Tab { id: TabId::new("t"), title: spec.title, route: spec.route,
//! #               closable: spec.closable, data: spec.data }
//! #     }
//! #     fn activate_tab(&self, _: &TabId) -> bool { true }
//! #     fn active_tab(&self) -> Observable<Option<Tab>> { self.0.clone() }
//! # }
//! # let bridge = std::rc::Rc::new(NoTabs(Observable::new(None)));
//!
//! let routes = vec![
//!     Route::new("/", "Home").exact(),
//!     Route::new("/users", "Users").child(Route::new("/:id", "User Detail")),
//! ];
//!
//! let router = DeepLinkRouter::with_policy(routes, bridge, NavigationPolicy::InPlace);
//! router.navigate("/users/42", NavigateOptions::new());
//!
//! assert_eq!(router.current_path().get(), "/users/42");
//! let titles: Vec<_> = router.get_breadcrumbs().into_iter().map(|b| b.title).collect();
//! assert_eq!(titles, vec!["Users", "User Detail"]);
//! ```
//!
//! # Features
//!
//! | Feature   | Default | Effect |
//! |-----------|---------|--------|
//! | `log`     | yes     | diagnostics through the `log` crate |
//! | `tracing` | no      | diagnostics through `tracing` (enable at most one) |
//! | `cache`   | yes     | LRU route-resolution cache ([`cache`] module) |

pub mod breadcrumbs;
#[cfg(feature = "cache")]
pub mod cache;
pub mod deeplink;
pub mod error;
pub mod history;
pub mod logging;
pub mod matcher;
pub mod observe;
pub mod params;
pub mod path;
pub mod route;
pub mod router;
pub mod tabs;

pub use breadcrumbs::{build_breadcrumbs, BreadcrumbItem};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, MatchCache};
pub use deeplink::{
    create_deep_link, DeepLinkOptions, DeepLinkParams, PARAM_OPEN_IN_TAB, PARAM_PRESERVE_HISTORY,
    PARAM_SOURCE, PARAM_STATE,
};
pub use error::{DeepLinkError, NavigationOutcome};
pub use history::{NavigationDirection, NavigationHistory, RouteChangeEvent};
pub use matcher::{match_route, RouteMatch};
pub use observe::{Observable, Subscription};
pub use params::{QueryParams, RouteParams};
pub use route::{find_route, Route};
pub use router::{DeepLinkRouter, NavigateOptions, NavigationPolicy, OpenTabOptions};
pub use tabs::{Tab, TabBridge, TabId, TabSpec};
