//! API error taxonomy and response rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use socium_graph::GraphError;

/// Errors surfaced to API callers.
///
/// Every variant renders as `{"detail": "<message>"}` with the
/// matching status code. Store failures collapse to a generic 500;
/// the underlying cause is logged server-side only.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(&'static str),
    BadRequest(String),
    Store(GraphError),
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        Self::Store(err)
    }
}

impl From<socium_graph::InvalidLabel> for ApiError {
    fn from(err: socium_graph::InvalidLabel) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::Store(err) => {
                tracing::error!(error = %err, "Store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Query execution error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("User not found").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("No node data provided".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(GraphError::Malformed("x".to_string()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
