// In-memory PostsApi for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{PostpeekError, Result};

use super::api::PostsApi;
use super::types::{PostDetail, PostSummary};

pub struct MockApi {
    posts: Mutex<std::result::Result<Vec<PostSummary>, String>>,
    details: Mutex<HashMap<u64, PostDetail>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockApi {
    /// Serve `posts` as the list; each post gets a detail with a generated body.
    pub fn with_posts(posts: &[(u64, &str)]) -> Self {
        let summaries = posts
            .iter()
            .map(|(id, title)| PostSummary {
                id: *id,
                title: title.to_string(),
            })
            .collect();
        let details = posts
            .iter()
            .map(|(id, title)| {
                (
                    *id,
                    PostDetail {
                        id: *id,
                        title: title.to_string(),
                        body: format!("Body of {}", title),
                    },
                )
            })
            .collect();

        Self {
            posts: Mutex::new(Ok(summaries)),
            details: Mutex::new(details),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Make the list query fail with `message`.
    pub fn failing(message: &str) -> Self {
        let api = Self::with_posts(&[]);
        api.fail_posts(message);
        api
    }

    pub fn fail_posts(&self, message: &str) {
        *self.posts.lock().unwrap() = Err(message.to_string());
    }

    pub fn set_posts(&self, posts: &[(u64, &str)]) {
        *self.posts.lock().unwrap() = Ok(posts
            .iter()
            .map(|(id, title)| PostSummary {
                id: *id,
                title: title.to_string(),
            })
            .collect());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostsApi for MockApi {
    async fn fetch_posts(&self) -> Result<Vec<PostSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.posts
            .lock()
            .unwrap()
            .clone()
            .map_err(PostpeekError::Other)
    }

    async fn fetch_post(&self, id: u64) -> Result<PostDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| PostpeekError::NotFound(format!("post {}", id)))
    }
}
