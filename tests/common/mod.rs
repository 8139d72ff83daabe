//! Test utilities shared by the integration suites.
//!
//! Provides a route-tree fixture and an in-memory [`TabBridge`] double that
//! records every activation so dedup behavior can be asserted.

#![allow(dead_code)]

use deeplink_router::{Observable, Route, Tab, TabBridge, TabId, TabSpec};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Enable log output for a test run (`RUST_LOG=debug cargo test`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small workspace-style route tree used across the suites.
pub fn workspace_routes() -> Vec<Route> {
    vec![
        Route::new("/", "Home").exact(),
        Route::new("/projects", "Projects").child(
            Route::new("/:projectId", "Project")
                .child(Route::new("/tasks/:taskId", "Task")),
        ),
        Route::new("/reports", "Reports").child(Route::new("/:reportId", "Report")),
        Route::new("/settings", "Settings").exact(),
    ]
}

/// In-memory tab manager implementing the bridge contract the router
/// consumes: exact route-path lookup, open-activates, and a reactive
/// active-tab value.
pub struct MemoryTabManager {
    tabs: RefCell<Vec<Tab>>,
    next_id: Cell<u32>,
    active: Observable<Option<Tab>>,
    activations: RefCell<Vec<TabId>>,
}

impl MemoryTabManager {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self {
            tabs: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            active: Observable::new(None),
            activations: RefCell::new(Vec::new()),
        })
    }

    /// Number of tabs currently stored.
    pub fn tab_count(&self) -> usize {
        self.tabs.borrow().len()
    }

    /// All recorded `activate_tab` calls, oldest first.
    pub fn activations(&self) -> Vec<TabId> {
        self.activations.borrow().clone()
    }

    /// Simulate the user clicking a tab, bypassing the router entirely.
    pub fn select_tab_by_route(&self, route: &str) -> bool {
        let found = self.find_tab_by_route(route);
        match found {
            Some(tab) => {
                self.active.set(Some(tab));
                true
            }
            None => false,
        }
    }
}

impl TabBridge for MemoryTabManager {
    fn find_tab_by_route(&self, path: &str) -> Option<Tab> {
        self.tabs.borrow().iter().find(|t| t.route == path).cloned()
    }

    fn open_tab(&self, spec: TabSpec) -> Tab {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let tab = Tab {
            id: TabId::new(format!("tab-{id}")),
            title: spec.title,
            route: spec.route,
            closable: spec.closable,
            data: spec.data,
        };
        self.tabs.borrow_mut().push(tab.clone());
        self.active.set(Some(tab.clone()));
        tab
    }

    fn activate_tab(&self, id: &TabId) -> bool {
        self.activations.borrow_mut().push(id.clone());

        let found = self
            .tabs
            .borrow()
            .iter()
            .find(|t| &t.id == id)
            .cloned();
        match found {
            Some(tab) => {
                self.active.set(Some(tab));
                true
            }
            None => false,
        }
    }

    fn active_tab(&self) -> Observable<Option<Tab>> {
        self.active.clone()
    }
}

/// Count emissions of an observable, excluding the subscribe-time replay.
pub struct EmissionCounter {
    count: Rc<Cell<usize>>,
}

impl EmissionCounter {
    pub fn attach<T: Clone + 'static>(value: &Observable<T>) -> Self {
        let count: Rc<Cell<usize>> = Rc::new(Cell::new(0));
        let count_in_cb = Rc::clone(&count);
        value
            .subscribe(move |_| count_in_cb.set(count_in_cb.get() + 1))
            .detach();
        // Discount the immediate replay.
        count.set(count.get().saturating_sub(1));
        Self { count }
    }

    pub fn get(&self) -> usize {
        self.count.get()
    }
}
