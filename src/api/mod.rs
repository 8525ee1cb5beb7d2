use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::search_service::SearchService;

pub mod handlers;
pub mod models;

pub fn create_router(service: Arc<SearchService>, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(handlers::search_handler))
        .route("/api/cards", get(handlers::cards_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(service)
        // Static frontend
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(cors)
}
