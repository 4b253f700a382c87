// GraphQL transport module.
// Client, wire types, and the typed posts API.

pub mod api;
pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use api::PostsApi;
pub use client::GraphQlClient;
pub use types::{PostDetail, PostSummary};
