//! Cloud glue helpers
//!
//! Pure logic extracted from cloud access paths: object URI parsing,
//! query-execution state mapping, and an explicit region-keyed client
//! cache. The SDK clients themselves stay outside this crate; callers
//! hold whatever client type their SDK provides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{Result, ToolbeltError};
use crate::general::unnest_key;

/// Parse the bucket name and key from an `s3://` URI
///
/// The key may be empty when the URI addresses a bare bucket.
pub fn parse_s3_uri(uri: &str) -> (String, String) {
    let trimmed = uri.strip_prefix("s3://").unwrap_or(uri);
    match trimmed.split_once('/') {
        Some((bucket, key)) => (bucket.to_string(), key.to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Lifecycle state of a submitted query execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryState {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl QueryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryState::Queued => "QUEUED",
            QueryState::Running => "RUNNING",
            QueryState::Succeeded => "SUCCEEDED",
            QueryState::Failed => "FAILED",
            QueryState::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "QUEUED" => Some(QueryState::Queued),
            "RUNNING" => Some(QueryState::Running),
            "SUCCEEDED" => Some(QueryState::Succeeded),
            "FAILED" => Some(QueryState::Failed),
            "CANCELLED" => Some(QueryState::Cancelled),
            _ => None,
        }
    }

    /// Whether the execution has finished, for better or worse
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryState::Succeeded | QueryState::Failed | QueryState::Cancelled
        )
    }
}

impl std::fmt::Display for QueryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the execution state from a get-query-execution response
///
/// Reads `QueryExecution.Status.State`; an unknown or missing state is
/// an error rather than a silent default.
pub fn query_state(response: &JsonValue) -> Result<QueryState> {
    let state = unnest_key(response, &["QueryExecution", "Status", "State"])
        .and_then(JsonValue::as_str);
    match state.and_then(QueryState::from_str) {
        Some(parsed) => Ok(parsed),
        None => Err(ToolbeltError::UnknownQueryState(
            state.unwrap_or("<missing>").to_string(),
        )),
    }
}

/// Extract the result location URI from a get-query-execution response
pub fn query_result_location(response: &JsonValue) -> Option<&str> {
    unnest_key(
        response,
        &["QueryExecution", "ResultConfiguration", "OutputLocation"],
    )
    .and_then(JsonValue::as_str)
}

/// Region-keyed client cache
///
/// Builds a client per region on first use and reuses it thereafter.
/// An explicit value owned by the caller, so tests and multi-tenant
/// code can hold independent caches instead of sharing process-global
/// state.
pub struct ClientCache<C> {
    factory: Box<dyn Fn(&str) -> C>,
    clients: HashMap<String, C>,
}

impl<C> ClientCache<C> {
    pub fn new(factory: impl Fn(&str) -> C + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            clients: HashMap::new(),
        }
    }

    /// Client for a region, constructing it on first request
    pub fn get(&mut self, region: &str) -> &C {
        if !self.clients.contains_key(region) {
            debug!(region, "constructing client for region");
            let client = (self.factory)(region);
            self.clients.insert(region.to_string(), client);
        }
        &self.clients[region]
    }

    pub fn contains(&self, region: &str) -> bool {
        self.clients.contains_key(region)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Drop all cached clients; returns whether any were held
    pub fn clear(&mut self) -> bool {
        let had_clients = !self.clients.is_empty();
        self.clients.clear();
        had_clients
    }
}
