// Query cache module.
// In-memory stale-while-revalidate cache shared by every query in the app.

pub mod key;
pub mod query;
pub mod store;

pub use key::QueryKey;
pub use query::{QueryOptions, QueryStatus};
pub use store::{CacheConfig, QueryCache, Subscription};

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use super::QueryCache;

    /// Wait until `done` holds, re-checking after every cache change.
    pub async fn wait_until(cache: &QueryCache, mut done: impl FnMut() -> bool) {
        let mut rx = cache.watch();
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if done() {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        })
        .await
        .expect("condition not reached within 5s");
    }
}
