//! Observable values.
//!
//! [`Observable`] is a single-value reactive holder: it always has a current
//! value, `subscribe` synchronously replays that value to the new subscriber,
//! and `set` synchronously notifies everyone. This is the entire reactive
//! surface the router needs — no streams runtime, no scheduling.
//!
//! The router's three outputs (current path, current match, breadcrumbs) and
//! the tab bridge's active-tab value are all `Observable`s.
//!
//! Single-threaded by design: the engine runs on a UI event loop, so the
//! holder uses `Rc`/`RefCell` and callbacks are plain `Fn` closures.
//! Notification iterates a snapshot of the subscriber list, so a callback
//! may subscribe, unsubscribe, or set the value reentrantly without
//! poisoning any borrow. When a callback sets the value mid-notification,
//! the remaining callbacks of the older round still see the value that
//! round started with.
//!
//! # Example
//!
//! ```
//! use deeplink_router::Observable;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let value = Observable::new(1);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let seen_in_cb = Rc::clone(&seen);
//! let _sub = value.subscribe(move |v| seen_in_cb.borrow_mut().push(*v));
//!
//! value.set(2);
//! assert_eq!(*seen.borrow(), vec![1, 2]); // initial replay, then the change
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
    next_id: Cell<u64>,
}

/// A reactive value holder with a cached current value.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a holder with an initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Store a new value and synchronously notify all subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Register a callback. It is invoked immediately with the current value
    /// and again on every subsequent [`set`](Self::set).
    ///
    /// The returned [`Subscription`] unsubscribes on drop; call
    /// [`detach`](Subscription::detach) to keep the callback for the
    /// holder's lifetime.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::clone(&callback)));

        // Replay the current value before returning, per the "always has a
        // current value" contract.
        let current = self.get();
        callback(&current);

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cleanup: Some(Box::new(move || {
                if let Some(inner) = Weak::upgrade(&weak) {
                    inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot the list so callbacks can mutate it reentrantly.
        let snapshot: Vec<Callback<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        let value = self.get();

        for callback in snapshot {
            callback(&value);
        }
    }
}

/// Guard for a live [`Observable::subscribe`] registration.
///
/// Dropping the guard removes the callback. [`detach`](Self::detach) leaks
/// the registration intentionally, keeping the callback alive as long as
/// the observable.
pub struct Subscription {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for the observable's lifetime.
    pub fn detach(mut self) {
        self.cleanup = None;
    }

    /// Remove the callback now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cleanup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_current_value() {
        let value = Observable::new(42);
        assert_eq!(value.get(), 42);

        value.set(7);
        assert_eq!(value.get(), 7);
    }

    #[test]
    fn test_subscribe_replays_current_value() {
        let value = Observable::new("initial".to_string());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_in_cb = Rc::clone(&seen);
        let _sub = value.subscribe(move |v: &String| seen_in_cb.borrow_mut().push(v.clone()));

        assert_eq!(*seen.borrow(), vec!["initial".to_string()]);
    }

    #[test]
    fn test_set_notifies_subscribers() {
        let value = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_in_cb = Rc::clone(&seen);
        let _sub = value.subscribe(move |v| seen_in_cb.borrow_mut().push(*v));

        value.set(1);
        value.set(2);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let value = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_in_cb = Rc::clone(&seen);
        let sub = value.subscribe(move |v| seen_in_cb.borrow_mut().push(*v));
        assert_eq!(value.subscriber_count(), 1);

        drop(sub);
        assert_eq!(value.subscriber_count(), 0);

        value.set(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_detach_keeps_subscription() {
        let value = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_in_cb = Rc::clone(&seen);
        value
            .subscribe(move |v| seen_in_cb.borrow_mut().push(*v))
            .detach();

        value.set(1);
        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(value.subscriber_count(), 1);
    }

    #[test]
    fn test_reentrant_set_does_not_panic() {
        let value = Observable::new(0);

        let value_in_cb = value.clone();
        value
            .subscribe(move |v| {
                if *v == 1 {
                    value_in_cb.set(2);
                }
            })
            .detach();

        value.set(1);
        assert_eq!(value.get(), 2);
    }

    #[test]
    fn test_reentrant_subscribe_does_not_panic() {
        let value = Observable::new(0);

        let value_in_cb = value.clone();
        value
            .subscribe(move |v| {
                if *v == 1 {
                    value_in_cb.subscribe(|_| {}).detach();
                }
            })
            .detach();

        value.set(1);
        assert_eq!(value.subscriber_count(), 2);
    }
}
