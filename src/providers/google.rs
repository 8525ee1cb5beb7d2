use futures::FutureExt;
use futures::future::BoxFuture;

use crate::config::SearchCredentials;
use crate::data_models::{Query, RawSearchItem, RawSearchResponse};
use crate::error::{Result, SearchError};

use super::SearchProvider;

/// Google Custom Search JSON API client.
pub struct GoogleSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleSearchClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn fetch(
        &self,
        credentials: &SearchCredentials,
        query: &Query,
    ) -> Result<Vec<RawSearchItem>> {
        let num = query.requested_count.to_string();
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", credentials.api_key.as_str()),
                ("cx", credentials.cx.as_str()),
                ("q", query.text.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            log::error!("search upstream returned {status}");
            return Err(SearchError::Upstream { detail });
        }

        let body: RawSearchResponse = res.json().await?;
        log::debug!("search upstream returned {} items", body.items.len());
        Ok(body.items)
    }
}

impl SearchProvider for GoogleSearchClient {
    fn search<'a>(
        &'a self,
        credentials: &'a SearchCredentials,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<RawSearchItem>>> {
        self.fetch(credentials, query).boxed()
    }
}

#[test]
fn test_parses_items_with_missing_fields() {
    let body = r#"{
        "kind": "customsearch#search",
        "items": [
            {"title": "Red Running Shoes", "link": "https://shop.test/1", "snippet": "Light shoes"},
            {"link": "https://shop.test/2", "pagemap": {"offer": [{"price": "49.00"}]}}
        ]
    }"#;
    let parsed: RawSearchResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.items.len(), 2);
    assert_eq!(parsed.items[0].title.as_deref(), Some("Red Running Shoes"));
    assert!(parsed.items[1].title.is_none());
    assert!(parsed.items[1].pagemap.is_some());
}

#[test]
fn test_response_without_items_is_empty() {
    let parsed: RawSearchResponse = serde_json::from_str(r#"{"kind": "x"}"#).unwrap();
    assert!(parsed.items.is_empty());
}
