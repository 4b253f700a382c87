// GraphQL HTTP client.
// Posts query documents to a single endpoint and unwraps the response envelope.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PostpeekError, Result};

use super::types::{GraphQlRequest, GraphQlResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client bound to one GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client for the given endpoint URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("postpeek"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PostpeekError::Http)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a query document and decode its `data` field.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let body = GraphQlRequest { query, variables };
        debug!(endpoint = %self.endpoint, "sending graphql request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(PostpeekError::Http)?;

        let response = check_response(response).await?;
        let text = response.text().await?;
        decode_response(&text)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(PostpeekError::Status {
            status,
            body: response.text().await.unwrap_or_default(),
        })
    }
}

/// Unwrap a GraphQL envelope, turning an `errors` array into an error.
pub(crate) fn decode_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(text)?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        return Err(PostpeekError::GraphQl(messages.join("; ")));
    }

    envelope
        .data
        .ok_or_else(|| PostpeekError::GraphQl("response contained no data".to_string()))
}
