use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Missing query parameter q")]
    MissingQuery,

    #[error("Invalid query string: {0}")]
    InvalidRequest(String),

    #[error("Server config error: missing API keys")]
    MissingCredentials,

    #[error("Google API error")]
    Upstream { detail: String },

    #[error("embedding request failed: {0}")]
    Embedding(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::MissingQuery | SearchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let detail = match self {
            SearchError::Upstream { detail } => Some(detail.clone()),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            detail,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_is_bad_request() {
        assert_eq!(SearchError::MissingQuery.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_request_is_bad_request() {
        let err = SearchError::InvalidRequest("duplicate field `q`".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body().error,
            "Invalid query string: duplicate field `q`"
        );
    }

    #[test]
    fn upstream_surfaces_detail() {
        let err = SearchError::Upstream {
            detail: "quota exceeded".into(),
        };
        let body = err.body();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Google API error");
        assert_eq!(body.detail.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn internal_uses_message() {
        let err = SearchError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().error, "boom");
    }
}
