//! Navigation outcomes and error taxonomy.
//!
//! Everything that can go wrong in this engine is local and recoverable:
//!
//! - An unmatched path is [`NavigationOutcome::NotFound`] — an ordinary
//!   value the caller handles, never a panic. The router logs it and stays
//!   on the current route.
//! - A deep-link `state` parameter that fails to decode is
//!   [`DeepLinkError::MalformedState`] — logged, dropped, and navigation
//!   proceeds without it.
//! - An unresolved breadcrumb parameter is a warning-level log; the literal
//!   `:name` token is kept rather than aborting the navigation chain.
//!
//! There is no fatal-error class here: the worst outcome is "stay on the
//! current route and log".

use crate::tabs::TabId;
use std::fmt;

/// The result of a navigation request.
///
/// Every call to [`DeepLinkRouter::navigate`](crate::DeepLinkRouter::navigate)
/// (and friends) returns this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The path resolved and history/streams were updated in place.
    Navigated {
        /// The normalized path that was applied.
        path: String,
    },
    /// The path resolved and was routed to a tab (created or activated).
    OpenedTab {
        /// The normalized path that was applied.
        path: String,
        /// The tab that now shows the route.
        tab: TabId,
    },
    /// Nothing in the route tree matched the path. Recoverable; the router
    /// stays on the current route.
    NotFound {
        /// The path that failed to resolve.
        path: String,
    },
    /// The target equals the current path — nothing was mutated and nothing
    /// was emitted.
    Unchanged,
}

impl NavigationOutcome {
    /// `true` when navigation changed router state (in place or via tab).
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Navigated { .. } | NavigationOutcome::OpenedTab { .. }
        )
    }

    /// `true` when no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationOutcome::NotFound { .. })
    }

    /// `true` when the request was a same-path no-op.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, NavigationOutcome::Unchanged)
    }

    /// The path this outcome concerns, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Navigated { path }
            | NavigationOutcome::OpenedTab { path, .. }
            | NavigationOutcome::NotFound { path } => Some(path),
            NavigationOutcome::Unchanged => None,
        }
    }
}

/// Errors arising while decoding deep-link parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    /// The `state` query parameter was not valid URL-encoded JSON.
    MalformedState {
        /// Decoder message describing the failure.
        message: String,
    },
}

impl fmt::Display for DeepLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLinkError::MalformedState { message } => {
                write!(f, "malformed deep-link state: {}", message)
            }
        }
    }
}

impl std::error::Error for DeepLinkError {}
