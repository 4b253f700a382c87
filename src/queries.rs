// Post queries.
// Binds the posts API to cache keys: ["posts"] for the list, ["post", id] for one post.

use std::sync::Arc;

use crate::cache::{QueryCache, QueryKey, QueryOptions, Subscription};
use crate::error::PostpeekError;
use crate::graphql::{PostDetail, PostSummary, PostsApi};

/// Cache key of the posts list.
pub fn posts_key() -> QueryKey {
    QueryKey::root("posts")
}

/// Cache key of one post.
pub fn post_key(id: Option<u64>) -> QueryKey {
    QueryKey::root("post").with(id)
}

/// Subscribe to the posts list.
pub fn posts(cache: &QueryCache, api: &Arc<dyn PostsApi>) -> Subscription<Vec<PostSummary>> {
    let api = Arc::clone(api);
    cache.subscribe(posts_key(), QueryOptions::default(), move || {
        let api = Arc::clone(&api);
        async move { api.fetch_posts().await }
    })
}

/// Subscribe to one post. Disabled when no id (or id 0) is given.
pub fn post(
    cache: &QueryCache,
    api: &Arc<dyn PostsApi>,
    id: Option<u64>,
) -> Subscription<PostDetail> {
    let enabled = id.is_some_and(|id| id != 0);
    let api = Arc::clone(api);
    cache.subscribe(post_key(id), QueryOptions::enabled(enabled), move || {
        let api = Arc::clone(&api);
        async move {
            match id {
                Some(id) => api.fetch_post(id).await,
                None => Err(PostpeekError::Other("no post selected".to_string())),
            }
        }
    })
}
