// Query cache store.
// Keyed in-memory results with staleness tracking, in-flight deduplication,
// background revalidation, retry, and eviction of unused entries.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::error::Result;

use super::key::QueryKey;
use super::query::{QueryOptions, QueryState, QueryStatus};

type AnyValue = Arc<dyn Any + Send + Sync>;
type FetchFuture = Pin<Box<dyn Future<Output = Result<AnyValue>> + Send>>;
type Fetcher = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

/// Default delay before the first retry; doubles per attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Cache-wide defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a successful result counts as fresh.
    pub stale_time: Duration,
    /// How long an entry without subscribers is kept.
    pub gc_time: Duration,
    /// Extra attempts after a failed fetch.
    pub retry: u32,
    /// Upper bound for the exponential retry delay.
    pub retry_delay_max: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
            retry: 3,
            retry_delay_max: Duration::from_secs(30),
        }
    }
}

/// One cache slot.
struct Entry {
    /// Last successful value.
    data: Option<AnyValue>,
    /// Message of the last foreground failure.
    error: Option<String>,
    /// When `data` was stored.
    updated_at: Option<DateTime<Utc>>,
    /// Forced stale by `invalidate`.
    invalidated: bool,
    /// A fetch for this key is in flight.
    fetching: bool,
    /// Number of live subscriptions.
    subscribers: usize,
    /// When the last subscription went away.
    inactive_since: Option<DateTime<Utc>>,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            fetching: false,
            subscribers: 0,
            inactive_since: Some(Utc::now()),
        }
    }

    /// Check if the stored value is older than `stale_time`.
    fn is_stale(&self, stale_time: Duration) -> bool {
        if self.invalidated {
            return true;
        }

        let Some(updated_at) = self.updated_at else {
            return true;
        };

        let elapsed = Utc::now()
            .signed_duration_since(updated_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= stale_time
    }

    /// Check if the entry can be evicted.
    fn is_collectable(&self, now: DateTime<Utc>, gc_time: Duration) -> bool {
        if self.subscribers > 0 || self.fetching {
            return false;
        }

        self.inactive_since.is_some_and(|since| {
            now.signed_duration_since(since)
                .to_std()
                .unwrap_or(Duration::ZERO)
                >= gc_time
        })
    }

    fn state<T: Any + Send + Sync>(&self) -> QueryState<T> {
        let status = match (self.data.clone(), &self.error) {
            (Some(data), _) => match data.downcast::<T>() {
                Ok(data) => QueryStatus::Success(data),
                Err(_) => QueryStatus::Pending,
            },
            (None, Some(message)) => QueryStatus::Error(message.clone()),
            (None, None) => QueryStatus::Pending,
        };

        QueryState {
            status,
            is_fetching: self.fetching,
        }
    }
}

struct Inner {
    config: CacheConfig,
    entries: Mutex<HashMap<QueryKey, Entry>>,
    version: watch::Sender<u64>,
}

/// Shared handle to the query cache. Cloning is cheap; clones share entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    /// Create an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                config,
                entries: Mutex::new(HashMap::new()),
                version,
            }),
        }
    }

    /// Read the cached value for `key` without subscribing or fetching.
    pub fn peek<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.entries();
        let data = entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    /// When the value under `key` was last fetched successfully.
    pub fn updated_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        self.entries().get(key)?.updated_at
    }

    /// Current state of `key`; pending when the key is unknown.
    pub fn state<T: Any + Send + Sync>(&self, key: &QueryKey) -> QueryState<T> {
        self.entries()
            .get(key)
            .map_or_else(QueryState::pending, Entry::state)
    }

    /// Register an observer for `key`, fetching if the entry is absent or stale.
    pub fn subscribe<T, F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetch: F,
    ) -> Subscription<T>
    where
        T: Any + Send + Sync,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || -> FetchFuture {
            let fut = fetch();
            Box::pin(async move { fut.await.map(|value| Arc::new(value) as AnyValue) })
        });

        {
            let mut entries = self.entries();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.subscribers += 1;
            entry.inactive_since = None;
        }

        let subscription = Subscription {
            cache: self.clone(),
            key,
            options,
            fetcher,
            _marker: PhantomData,
        };

        if options.enabled {
            self.start_fetch(
                &subscription.key,
                &subscription.options,
                &subscription.fetcher,
                false,
            );
        }

        subscription
    }

    /// Mark `key` stale so the next subscription revalidates it.
    #[allow(dead_code)]
    pub fn invalidate(&self, key: &QueryKey) {
        let found = match self.entries().get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        };

        if found {
            debug!(key = %key, "invalidated query");
            self.notify();
        }
    }

    /// Evict entries that have had no subscribers for `gc_time`.
    /// Returns the number of evicted entries.
    pub fn gc(&self) -> usize {
        let now = Utc::now();
        let gc_time = self.inner.config.gc_time;

        let evicted = {
            let mut entries = self.entries();
            let before = entries.len();
            entries.retain(|key, entry| {
                let collect = entry.is_collectable(now, gc_time);
                if collect {
                    debug!(key = %key, "evicting unused query");
                }
                !collect
            });
            before - entries.len()
        };

        if evicted > 0 {
            self.notify();
        }
        evicted
    }

    /// Receiver that changes whenever any entry changes.
    #[allow(dead_code)]
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.inner.version.subscribe()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.inner.version.send_modify(|v| *v = v.wrapping_add(1));
    }

    /// Start a fetch for `key` unless one is in flight or the value is fresh.
    /// `force` skips the freshness check. Returns whether a fetch was started.
    fn start_fetch(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        fetcher: &Fetcher,
        force: bool,
    ) -> bool {
        let stale_time = options.stale_time.unwrap_or(self.inner.config.stale_time);
        let retry = options.retry.unwrap_or(self.inner.config.retry);

        {
            let mut entries = self.entries();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

            if entry.fetching {
                debug!(key = %key, "fetch already in flight");
                return false;
            }
            if !force && entry.data.is_some() && !entry.is_stale(stale_time) {
                return false;
            }

            entry.fetching = true;
            if entry.data.is_none() {
                entry.error = None;
                debug!(key = %key, "starting foreground fetch");
            } else {
                debug!(key = %key, "starting background revalidation");
            }
        }
        self.notify();

        let cache = self.clone();
        let key = key.clone();
        let fetcher = Arc::clone(fetcher);
        tokio::spawn(async move {
            let result = cache.fetch_with_retry(&key, &fetcher, retry).await;
            cache.finish(&key, result);
        });

        true
    }

    async fn fetch_with_retry(
        &self,
        key: &QueryKey,
        fetcher: &Fetcher,
        retry: u32,
    ) -> Result<AnyValue> {
        let mut attempt = 0;
        loop {
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < retry => {
                    let delay = self.retry_delay(attempt);
                    debug!(key = %key, attempt, error = %err, ?delay, "fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        RETRY_BASE_DELAY
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.inner.config.retry_delay_max)
    }

    /// Store the outcome of a fetch. A failure never replaces a good value.
    fn finish(&self, key: &QueryKey, result: Result<AnyValue>) {
        {
            let mut entries = self.entries();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.fetching = false;

            match result {
                Ok(value) => {
                    debug!(key = %key, "fetch succeeded");
                    entry.data = Some(value);
                    entry.error = None;
                    entry.updated_at = Some(Utc::now());
                    entry.invalidated = false;
                }
                Err(err) if entry.data.is_some() => {
                    warn!(key = %key, error = %err, "background revalidation failed, keeping cached value");
                }
                Err(err) => {
                    error!(key = %key, error = %err, "fetch failed");
                    entry.error = Some(err.to_string());
                }
            }
        }
        self.notify();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// A live observer of one key. Dropping it releases the subscription;
/// a fetch already in flight still completes into the cache.
pub struct Subscription<T> {
    cache: QueryCache,
    key: QueryKey,
    options: QueryOptions,
    fetcher: Fetcher,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> Subscription<T> {
    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Current state of the observed key.
    pub fn state(&self) -> QueryState<T> {
        self.cache.state(&self.key)
    }

    /// Fetch regardless of freshness. No-op when disabled or already fetching.
    pub fn refetch(&self) -> bool {
        if !self.options.enabled {
            return false;
        }
        self.cache
            .start_fetch(&self.key, &self.options, &self.fetcher, true)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(entry) = self.cache.entries().get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.inactive_since = Some(Utc::now());
            }
        }
    }
}
