//! Deep-link encoding and decoding.
//!
//! A deep link is a path plus side-channel instructions carried in
//! recognized query parameters:
//!
//! | Key               | Meaning                                             |
//! |-------------------|-----------------------------------------------------|
//! | `openInTab`       | `"true"`/`"1"`: route the target through a tab      |
//! | `preserveHistory` | presence/true: push instead of replacing in history |
//! | `source`          | opaque origin string, passed through to the host    |
//! | `state`           | URL-encoded JSON object merged into nav state       |
//!
//! Unrecognized keys pass through untouched in both directions.
//!
//! [`create_deep_link`] and [`DeepLinkParams::extract`] are inverses:
//! encoding then extracting recovers the options, and extracting returns
//! the rewritten URL with the recognized keys removed — so processing the
//! rewritten URL again (e.g. on remount) finds nothing left to do.
//! A `state` value that fails to decode as JSON is logged and dropped;
//! navigation proceeds without it.

use crate::error::DeepLinkError;
use crate::params::QueryParams;
use crate::path::{normalize_path, split_query};
use crate::warn_log;
use serde_json::Value;

/// Query key requesting tab presentation.
pub const PARAM_OPEN_IN_TAB: &str = "openInTab";
/// Query key requesting a history push instead of a replace.
pub const PARAM_PRESERVE_HISTORY: &str = "preserveHistory";
/// Query key carrying the link's origin, for the host's analytics.
pub const PARAM_SOURCE: &str = "source";
/// Query key carrying URL-encoded JSON state.
pub const PARAM_STATE: &str = "state";

/// Options for [`create_deep_link`].
///
/// # Example
///
/// ```
/// use deeplink_router::DeepLinkOptions;
///
/// let options = DeepLinkOptions::new()
///     .open_in_tab()
///     .source("weekly-report")
///     .state(serde_json::json!({"highlight": "totals"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLinkOptions {
    /// Ask the consumer to route the target through a tab.
    pub open_in_tab: bool,
    /// Ask the consumer to push a history entry instead of replacing.
    pub preserve_history: bool,
    /// Opaque origin tag, passed through for analytics.
    pub source: Option<String>,
    /// JSON state to deliver to the target.
    pub state: Option<Value>,
    /// Additional query parameters appended as-is.
    pub extra: Vec<(String, String)>,
}

impl DeepLinkOptions {
    /// Empty options: the link carries no instructions beyond its path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request tab presentation.
    pub fn open_in_tab(mut self) -> Self {
        self.open_in_tab = true;
        self
    }

    /// Request a history push on consumption.
    pub fn preserve_history(mut self) -> Self {
        self.preserve_history = true;
        self
    }

    /// Tag the link with its origin.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach JSON state.
    pub fn state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Append an arbitrary extra query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

/// Serialize deep-link options onto a path.
///
/// Query parameters already on the path are kept. The `state` value is JSON
/// encoded and then URL encoded by query serialization.
///
/// # Example
///
/// ```
/// use deeplink_router::{create_deep_link, DeepLinkOptions, DeepLinkParams};
///
/// let url = create_deep_link(
///     "/reports/42",
///     &DeepLinkOptions::new().source("email").state(serde_json::json!({"k": 1})),
/// );
///
/// let (params, rewritten) = DeepLinkParams::extract(&url);
/// assert_eq!(params.source.as_deref(), Some("email"));
/// assert_eq!(params.state.unwrap()["k"], 1);
/// assert_eq!(rewritten, "/reports/42");
/// ```
#[must_use]
pub fn create_deep_link(path: &str, options: &DeepLinkOptions) -> String {
    let normalized = normalize_path(path);
    let (path_part, query_part) = split_query(&normalized);

    let mut query = query_part
        .map(QueryParams::from_query_string)
        .unwrap_or_default();

    if options.open_in_tab {
        query.insert(PARAM_OPEN_IN_TAB.to_string(), "true".to_string());
    }
    if options.preserve_history {
        query.insert(PARAM_PRESERVE_HISTORY.to_string(), "true".to_string());
    }
    if let Some(source) = &options.source {
        query.insert(PARAM_SOURCE.to_string(), source.clone());
    }
    if let Some(state) = &options.state {
        // A Value always serializes; query encoding handles the URL layer.
        query.insert(PARAM_STATE.to_string(), state.to_string());
    }
    for (key, value) in &options.extra {
        query.insert(key.clone(), value.clone());
    }

    if query.is_empty() {
        path_part.to_string()
    } else {
        format!("{}?{}", path_part, query.to_query_string())
    }
}

/// Recognized deep-link instructions decoded from a URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLinkParams {
    /// The link asked for tab presentation.
    pub open_in_tab: bool,
    /// The link asked for a history push instead of a replace.
    pub preserve_history: bool,
    /// Origin tag for the host's analytics, if present.
    pub source: Option<String>,
    /// Decoded JSON state, if present and well-formed.
    pub state: Option<Value>,
}

impl DeepLinkParams {
    /// `true` when the URL carried none of the recognized keys.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Decode the recognized keys from `url`.
    ///
    /// Returns the decoded instructions and the rewritten URL with the
    /// recognized keys removed; unrecognized query parameters survive
    /// untouched. Extracting from the rewritten URL yields empty params and
    /// the same URL — consumption is idempotent.
    #[must_use]
    pub fn extract(url: &str) -> (Self, String) {
        let normalized = normalize_path(url);
        let (path_part, query_part) = split_query(&normalized);

        let Some(query_part) = query_part else {
            return (Self::default(), normalized.into_owned());
        };

        let mut query = QueryParams::from_query_string(query_part);

        let open_in_tab = query
            .remove(PARAM_OPEN_IN_TAB)
            .is_some_and(|values| values.iter().any(|v| v == "true" || v == "1"));

        // Presence counts, so `?preserveHistory` alone enables it; an
        // explicit false/0 disables.
        let preserve_history = query
            .remove(PARAM_PRESERVE_HISTORY)
            .is_some_and(|values| !values.iter().any(|v| v == "false" || v == "0"));

        let source = query
            .remove(PARAM_SOURCE)
            .and_then(|values| values.into_iter().next());

        let state = query
            .remove(PARAM_STATE)
            .and_then(|values| values.into_iter().next())
            .and_then(|raw| match decode_state(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn_log!("{} in '{}', dropping state", err, url);
                    None
                }
            });

        let rewritten = if query.is_empty() {
            path_part.to_string()
        } else {
            format!("{}?{}", path_part, query.to_query_string())
        };

        (
            Self {
                open_in_tab,
                preserve_history,
                source,
                state,
            },
            rewritten,
        )
    }
}

/// Decode a (already URL-decoded) `state` parameter as JSON.
fn decode_state(raw: &str) -> Result<Value, DeepLinkError> {
    serde_json::from_str(raw).map_err(|err| DeepLinkError::MalformedState {
        message: err.to_string(),
    })
}
