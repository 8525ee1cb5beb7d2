use serde::{Deserialize, Serialize};

use crate::data_models::ScoredCandidate;
use crate::search_service::SearchOutcome;

/// Query string of `/api/search` and `/api/cards`. `num` stays a string so a
/// malformed value falls back to the default instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub num: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ScoredCandidate>,
    pub total_results: usize,
    pub processing_time_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SearchResponse {
    pub fn from_outcome(outcome: SearchOutcome, processing_time_ms: u128) -> Self {
        Self {
            query: outcome.query.text,
            total_results: outcome.results.len(),
            results: outcome.results,
            processing_time_ms,
            warning: outcome.warning,
            detail: outcome.detail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub strategy: String,
}
