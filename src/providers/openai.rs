use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingCredentials;
use crate::error::{Result, SearchError};

use super::EmbeddingProvider;

#[derive(Serialize, Debug)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize, Debug)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize, Debug)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI embeddings API client. Sends the whole batch in one request.
pub struct OpenAiEmbeddingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiEmbeddingClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn fetch(
        &self,
        credentials: &EmbeddingCredentials,
        inputs: &[String],
    ) -> Result<Vec<Vec<f32>>> {
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&credentials.api_key)
            .json(&EmbeddingRequest {
                model: &credentials.model,
                input: inputs,
            })
            .send()
            .await
            .map_err(|e| SearchError::Embedding(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SearchError::Embedding(format!("status {status}: {body}")));
        }

        let body: EmbeddingResponse = res
            .json()
            .await
            .map_err(|e| SearchError::Embedding(e.to_string()))?;
        into_vectors(body)
    }
}

fn into_vectors(mut body: EmbeddingResponse) -> Result<Vec<Vec<f32>>> {
    if body.data.is_empty() {
        return Err(SearchError::Embedding("no embeddings returned".into()));
    }
    body.data.sort_by_key(|d| d.index);
    Ok(body.data.into_iter().map(|d| d.embedding).collect())
}

impl EmbeddingProvider for OpenAiEmbeddingClient {
    fn embed<'a>(
        &'a self,
        credentials: &'a EmbeddingCredentials,
        inputs: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
        self.fetch(credentials, inputs).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_follow_input_index() {
        let body: EmbeddingResponse = serde_json::from_str(
            r#"{"data": [
                {"index": 1, "embedding": [0.0, 1.0]},
                {"index": 0, "embedding": [1.0, 0.0]}
            ]}"#,
        )
        .unwrap();
        let vectors = into_vectors(body).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn empty_data_is_an_error() {
        let body: EmbeddingResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(matches!(into_vectors(body), Err(SearchError::Embedding(_))));
    }

    #[test]
    fn request_body_shape() {
        let inputs = vec!["red shoes".to_string(), "Red Shoes cheap".to_string()];
        let value = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-3-small",
            input: &inputs,
        })
        .unwrap();
        assert_eq!(value["model"], "text-embedding-3-small");
        assert_eq!(value["input"][1], "Red Shoes cheap");
    }
}
