use std::sync::Arc;

use crate::config::Config;
use crate::data_models::{Candidate, Query, ScoredCandidate};
use crate::error::{Result, SearchError};
use crate::normalizer::normalize_all;
use crate::providers::{
    EmbeddingProvider, GoogleSearchClient, OpenAiEmbeddingClient, SearchProvider,
    build_http_client,
};
use crate::ranking::rank;
use crate::scoring::{Scorer, ScoringContext, ScoringStrategy, cosine_similarity};

pub const EMBEDDING_WARNING: &str = "Embedding service unavailable; results are not ranked";

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: Query,
    pub results: Vec<ScoredCandidate>,
    pub warning: Option<String>,
    pub detail: Option<String>,
}

/// Runs one search request end to end: intake, retrieval, normalization,
/// optional embedding, scoring and ranking.
pub struct SearchService {
    config: Config,
    search: Arc<dyn SearchProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    scorer: Box<dyn Scorer>,
}

impl SearchService {
    pub fn new(
        config: Config,
        search: Arc<dyn SearchProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        let scorer = config.strategy.scorer();
        Self {
            config,
            search,
            embedder,
            scorer,
        }
    }

    /// Wires the Google and OpenAI clients from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = build_http_client(config.http_timeout)?;
        let search = Arc::new(GoogleSearchClient::new(
            client.clone(),
            config.google_endpoint.clone(),
        ));
        let embedder = Arc::new(OpenAiEmbeddingClient::new(
            client,
            config.openai_endpoint.clone(),
        ));
        Ok(Self::new(config, search, embedder))
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.config.strategy
    }

    pub fn parse_query(&self, q: Option<&str>, num: Option<&str>) -> Result<Query> {
        let text = q.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(SearchError::MissingQuery);
        }
        let requested = num
            .and_then(|n| n.trim().parse::<i64>().ok())
            .unwrap_or(self.config.default_results);
        Ok(Query::new(text, requested, self.config.result_cap()))
    }

    pub async fn search(&self, q: Option<&str>, num: Option<&str>) -> Result<SearchOutcome> {
        let query = self.parse_query(q, num)?;

        let search_credentials = self
            .config
            .search_credentials()
            .ok_or(SearchError::MissingCredentials)?;
        let embedding_credentials = if self.strategy().needs_embeddings() {
            Some(
                self.config
                    .embedding_credentials()
                    .ok_or(SearchError::MissingCredentials)?,
            )
        } else {
            None
        };

        let items = self.search.search(&search_credentials, &query).await?;
        let candidates = normalize_all(items);
        tracing::debug!(count = candidates.len(), "normalized candidates");

        let Some(credentials) = embedding_credentials else {
            let results = self.score_all(candidates, &query, &[]);
            return Ok(SearchOutcome {
                query,
                results,
                warning: None,
                detail: None,
            });
        };

        if candidates.is_empty() {
            return Ok(SearchOutcome {
                query,
                results: Vec::new(),
                warning: None,
                detail: None,
            });
        }

        let inputs: Vec<String> = std::iter::once(query.text.clone())
            .chain(candidates.iter().map(Candidate::embedding_text))
            .collect();

        let vectors = self
            .embedder
            .embed(&credentials, &inputs)
            .await
            .and_then(|vectors| check_vector_count(vectors, inputs.len()));

        match vectors {
            Ok(vectors) => {
                let query_vector = &vectors[0];
                let similarities: Vec<f64> = vectors[1..]
                    .iter()
                    .map(|v| cosine_similarity(query_vector, v))
                    .collect();
                let results = self.score_all(candidates, &query, &similarities);
                Ok(SearchOutcome {
                    query,
                    results,
                    warning: None,
                    detail: None,
                })
            }
            Err(e) => {
                log::warn!("embedding failed, returning unranked results: {e}");
                Ok(SearchOutcome {
                    query,
                    results: candidates
                        .into_iter()
                        .map(ScoredCandidate::unranked)
                        .collect(),
                    warning: Some(EMBEDDING_WARNING.to_string()),
                    detail: Some(e.to_string()),
                })
            }
        }
    }

    fn score_all(
        &self,
        candidates: Vec<Candidate>,
        query: &Query,
        similarities: &[f64],
    ) -> Vec<ScoredCandidate> {
        let scored = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let context = ScoringContext {
                    similarity: similarities.get(i).copied(),
                };
                self.scorer.score(candidate, query, &context)
            })
            .collect();
        rank(scored)
    }
}

fn check_vector_count(vectors: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if vectors.len() < expected {
        return Err(SearchError::Embedding(format!(
            "expected {expected} embeddings, got {}",
            vectors.len()
        )));
    }
    Ok(vectors)
}

#[test]
fn test_check_vector_count() {
    assert!(check_vector_count(vec![vec![1.0]; 3], 3).is_ok());
    assert!(matches!(
        check_vector_count(vec![vec![1.0]; 2], 3),
        Err(SearchError::Embedding(_))
    ));
}
