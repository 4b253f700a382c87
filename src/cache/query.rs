// Query state and per-subscription options.
// Observers read a QueryState snapshot of their key on every draw.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of a cached query result.
pub enum QueryStatus<T> {
    Pending,
    Error(String),
    Success(Arc<T>),
}

impl<T> Clone for QueryStatus<T> {
    fn clone(&self) -> Self {
        match self {
            QueryStatus::Pending => QueryStatus::Pending,
            QueryStatus::Error(message) => QueryStatus::Error(message.clone()),
            QueryStatus::Success(data) => QueryStatus::Success(Arc::clone(data)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for QueryStatus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::Pending => write!(f, "Pending"),
            QueryStatus::Error(message) => f.debug_tuple("Error").field(message).finish(),
            QueryStatus::Success(data) => f.debug_tuple("Success").field(data).finish(),
        }
    }
}

/// Snapshot of a query: its status plus whether a fetch is in flight.
pub struct QueryState<T> {
    pub status: QueryStatus<T>,
    pub is_fetching: bool,
}

impl<T> QueryState<T> {
    pub fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            is_fetching: false,
        }
    }

    #[allow(dead_code)]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, QueryStatus::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success(_))
    }

    #[allow(dead_code)]
    pub fn is_error(&self) -> bool {
        matches!(self.status, QueryStatus::Error(_))
    }

    /// True while a background refresh runs behind an already successful value.
    pub fn is_revalidating(&self) -> bool {
        self.is_fetching && self.is_success()
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match &self.status {
            QueryStatus::Success(data) => Some(data),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status.clone(),
            is_fetching: self.is_fetching,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryState")
            .field("status", &self.status)
            .field("is_fetching", &self.is_fetching)
            .finish()
    }
}

/// Per-subscription settings. Unset fields fall back to the cache defaults.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// When false, the subscription never fetches.
    pub enabled: bool,
    pub stale_time: Option<Duration>,
    pub retry: Option<u32>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: None,
            retry: None,
        }
    }
}

impl QueryOptions {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }
}
