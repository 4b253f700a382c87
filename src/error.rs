// Error types for postpeek.
// Covers transport, GraphQL, decoding, and logging setup failures.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostpeekError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Log(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PostpeekError>;
