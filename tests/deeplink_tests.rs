//! Deep-link consumption through the router: round trips, idempotent
//! processing, history modes, and malformed-state recovery.

mod common;

use common::{workspace_routes, MemoryTabManager};
use deeplink_router::{
    DeepLinkOptions, DeepLinkParams, DeepLinkRouter, NavigateOptions, NavigationPolicy, TabBridge,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn tabbed_router() -> (DeepLinkRouter, Rc<MemoryTabManager>) {
    common::init_logging();
    let tabs = MemoryTabManager::shared();
    let router = DeepLinkRouter::new(workspace_routes(), tabs.clone());
    (router, tabs)
}

fn in_place_router() -> DeepLinkRouter {
    common::init_logging();
    DeepLinkRouter::with_policy(
        workspace_routes(),
        MemoryTabManager::shared(),
        NavigationPolicy::InPlace,
    )
}

#[test]
fn round_trip_recovers_source_and_state() {
    let router = in_place_router();

    let url = router.create_deep_link(
        "/reports/q3",
        &DeepLinkOptions::new().source("weekly-email").state(json!({"k": 1})),
    );

    let (params, rewritten) = DeepLinkParams::extract(&url);
    assert_eq!(params.source.as_deref(), Some("weekly-email"));
    assert_eq!(params.state, Some(json!({"k": 1})));
    assert_eq!(rewritten, "/reports/q3");
}

#[test]
fn consumption_navigates_and_cleans_the_url() {
    let router = in_place_router();
    router.navigate("/projects", NavigateOptions::new());

    let url = router.create_deep_link(
        "/reports/q3",
        &DeepLinkOptions::new().source("dashboard").state(json!({"highlight": "totals"})),
    );

    let (outcome, rewritten) = router.handle_deep_link(&url).unwrap();
    assert!(outcome.is_success());
    assert_eq!(rewritten, "/reports/q3");
    assert_eq!(router.current_path().get(), "/reports/q3");

    // The state payload landed in the navigation state.
    assert_eq!(router.navigation_state()["highlight"], "totals");
}

#[test]
fn reprocessing_the_rewritten_url_is_idempotent() {
    let router = in_place_router();
    router.navigate("/projects", NavigateOptions::new());

    let url = router.create_deep_link("/reports/q3", &DeepLinkOptions::new().source("s"));

    let (_, rewritten) = router.handle_deep_link(&url).unwrap();
    let history_after_first = router.history_entries();

    // e.g. a remount hands the processed URL back in.
    let (outcome, rewritten_again) = router.handle_deep_link(&rewritten).unwrap();
    assert!(outcome.is_unchanged());
    assert_eq!(rewritten, rewritten_again);
    assert_eq!(router.history_entries(), history_after_first);
}

#[test]
fn deep_link_replaces_history_by_default() {
    let router = in_place_router();
    router.navigate("/projects", NavigateOptions::new());
    router.navigate("/settings", NavigateOptions::new());

    let url = router.create_deep_link("/reports/q3", &DeepLinkOptions::new());
    router.handle_deep_link(&url).unwrap();

    // The deep link replaced /settings rather than growing the stack.
    assert_eq!(
        router.history_entries(),
        vec!["/projects".to_string(), "/reports/q3".to_string()]
    );
}

#[test]
fn preserve_history_pushes_instead() {
    let router = in_place_router();
    router.navigate("/projects", NavigateOptions::new());
    router.navigate("/settings", NavigateOptions::new());

    let url = router.create_deep_link("/reports/q3", &DeepLinkOptions::new().preserve_history());
    router.handle_deep_link(&url).unwrap();

    assert_eq!(
        router.history_entries(),
        vec![
            "/projects".to_string(),
            "/settings".to_string(),
            "/reports/q3".to_string(),
        ]
    );
}

#[test]
fn open_in_tab_param_routes_through_the_bridge() {
    let tabs = MemoryTabManager::shared();
    let router = DeepLinkRouter::with_policy(
        workspace_routes(),
        tabs.clone(),
        NavigationPolicy::InPlace,
    );

    // Even with an in-place router, the link itself asks for a tab.
    let url = router.create_deep_link("/reports/q3", &DeepLinkOptions::new().open_in_tab());
    let (outcome, _) = router.handle_deep_link(&url).unwrap();

    assert!(outcome.is_success());
    assert_eq!(tabs.tab_count(), 1);
}

#[test]
fn deep_link_state_becomes_tab_data() {
    let (router, tabs) = tabbed_router();

    let url = router.create_deep_link(
        "/reports/q3",
        &DeepLinkOptions::new().state(json!({"filter": "emea"})),
    );
    router.handle_deep_link(&url).unwrap();

    let tab = tabs.find_tab_by_route("/reports/q3").unwrap();
    assert_eq!(tab.data, Some(json!({"filter": "emea"})));
}

#[test]
fn malformed_state_is_dropped_but_navigation_proceeds() {
    let router = in_place_router();

    let (outcome, rewritten) = router
        .handle_deep_link("/reports/q3?state=%7Bnot-json&source=bad")
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(rewritten, "/reports/q3");
    assert_eq!(router.current_path().get(), "/reports/q3");
    assert!(router.navigation_state().is_empty());
}

#[test]
fn unrecognized_params_survive_consumption() {
    let router = in_place_router();

    let (outcome, rewritten) = router
        .handle_deep_link("/reports/q3?source=s&utm=campaign")
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(rewritten, "/reports/q3?utm=campaign");
    // The surviving query is part of the navigated path.
    assert_eq!(router.current_path().get(), "/reports/q3?utm=campaign");
    let m = router.current_route().get().unwrap();
    assert_eq!(m.query.get("utm"), Some(&"campaign".to_string()));
}

#[test]
fn nested_deep_link_processing_is_suppressed() {
    let router = in_place_router();

    // Simulate a host URL-change handler that feeds the URL straight back
    // into the router while the first deep link is still being processed.
    let suppressions = Rc::new(RefCell::new(Vec::new()));
    let suppressions_in_cb = Rc::clone(&suppressions);
    let router_in_cb = router.clone();
    router
        .current_path()
        .subscribe(move |path: &String| {
            if path.starts_with("/reports") {
                let nested = router_in_cb.handle_deep_link("/projects?source=feedback");
                suppressions_in_cb.borrow_mut().push(nested.is_none());
            }
        })
        .detach();

    let url = router.create_deep_link("/reports/q3", &DeepLinkOptions::new().source("s"));
    let (outcome, _) = router.handle_deep_link(&url).unwrap();

    assert!(outcome.is_success());
    assert!(!suppressions.borrow().is_empty());
    assert!(suppressions.borrow().iter().all(|&s| s));
    // The nested link never navigated.
    assert_eq!(router.current_path().get(), "/reports/q3");
}

#[test]
fn unmatched_deep_link_is_recoverable() {
    let router = in_place_router();
    router.navigate("/projects", NavigateOptions::new());

    let url = router.create_deep_link("/nope", &DeepLinkOptions::new().source("s"));
    let (outcome, _) = router.handle_deep_link(&url).unwrap();

    assert!(outcome.is_not_found());
    assert!(router.current_route().get().is_none());
}
