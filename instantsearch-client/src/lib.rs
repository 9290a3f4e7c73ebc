//! HTTP [`SearchClient`](instantsearch::SearchClient) for the hosted search
//! service, plus a ready-made factory for `create_instant_search`.

pub mod client;
pub mod config;
pub mod error;

pub use client::{base_agent, http_client_factory, HttpSearchClient};
pub use config::SearchClientConfig;
pub use error::ClientError;
