use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::error::SearchError;
use crate::render::{render_cards, render_error};
use crate::search_service::SearchService;

use super::models::{HealthResponse, SearchParams, SearchResponse};

fn query_params(
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<SearchParams, SearchError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| SearchError::InvalidRequest(rejection.body_text()))
}

fn request_span(route: &'static str) -> tracing::Span {
    tracing::info_span!("request", route, request_id = %nanoid::nanoid!(10))
}

pub async fn search_handler(
    State(service): State<Arc<SearchService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    async move {
        let start = Instant::now();
        let params = query_params(params)?;
        tracing::debug!(q = ?params.q, num = ?params.num, "search request");

        let outcome = service
            .search(params.q.as_deref(), params.num.as_deref())
            .await
            .inspect_err(|e| tracing::warn!(status = %e.status(), "search failed: {e}"))?;

        let processing_time_ms = start.elapsed().as_millis();
        tracing::info!(
            results = outcome.results.len(),
            degraded = outcome.warning.is_some(),
            processing_time_ms,
            "search complete"
        );
        Ok::<_, SearchError>(Json(SearchResponse::from_outcome(
            outcome,
            processing_time_ms,
        )))
    }
    .instrument(request_span("search"))
    .await
}

pub async fn cards_handler(
    State(service): State<Arc<SearchService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> (StatusCode, Html<String>) {
    async move {
        let result = match query_params(params) {
            Ok(params) => {
                service
                    .search(params.q.as_deref(), params.num.as_deref())
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(outcome) => (
                StatusCode::OK,
                Html(render_cards(&outcome.results, outcome.warning.as_deref())),
            ),
            Err(e) => {
                tracing::warn!(status = %e.status(), "card render failed: {e}");
                (e.status(), Html(render_error(&e.to_string())))
            }
        }
    }
    .instrument(request_span("cards"))
    .await
}

pub async fn health_handler(State(service): State<Arc<SearchService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        strategy: service.strategy().to_string(),
    })
}

/// Turns a handler panic into the same JSON 500 body as other internal errors.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal server error".to_string()
    };
    log::error!("handler panicked: {message}");
    SearchError::Internal(anyhow::anyhow!(message)).into_response()
}
