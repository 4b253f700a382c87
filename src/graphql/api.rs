// Posts API.
// The two queries the app issues, behind a trait so tests can swap transports.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{PostpeekError, Result};

use super::client::GraphQlClient;
use super::types::{PostData, PostDetail, PostSummary, PostsData};

const POSTS_QUERY: &str = r#"
query {
  posts {
    data {
      id
      title
    }
  }
}
"#;

const POST_QUERY: &str = r#"
query ($id: ID!) {
  post(id: $id) {
    id
    title
    body
  }
}
"#;

/// Remote source of posts.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch all post summaries.
    async fn fetch_posts(&self) -> Result<Vec<PostSummary>>;

    /// Fetch one post with its body.
    async fn fetch_post(&self, id: u64) -> Result<PostDetail>;
}

#[async_trait]
impl PostsApi for GraphQlClient {
    async fn fetch_posts(&self) -> Result<Vec<PostSummary>> {
        let data: PostsData = self.request(POSTS_QUERY, None).await?;
        Ok(data.posts.data)
    }

    async fn fetch_post(&self, id: u64) -> Result<PostDetail> {
        let variables = json!({ "id": id.to_string() });
        let data: PostData = self.request(POST_QUERY, Some(variables)).await?;
        data.post
            .ok_or_else(|| PostpeekError::NotFound(format!("post {}", id)))
    }
}
