use futures::future::BoxFuture;
use std::time::Duration;

use crate::config::{EmbeddingCredentials, SearchCredentials};
use crate::data_models::{Query, RawSearchItem};
use crate::error::Result;

pub mod google;
pub mod openai;

pub use google::GoogleSearchClient;
pub use openai::OpenAiEmbeddingClient;

/// Retrieves raw result items for a query. One upstream call per invocation.
pub trait SearchProvider: Send + Sync {
    fn search<'a>(
        &'a self,
        credentials: &'a SearchCredentials,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<RawSearchItem>>>;
}

/// Embeds a batch of texts. Returns one vector per input, in input order.
pub trait EmbeddingProvider: Send + Sync {
    fn embed<'a>(
        &'a self,
        credentials: &'a EmbeddingCredentials,
        inputs: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cardsearch/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
