use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

/// Errores de las operaciones del núcleo. Todos se detectan antes de mutar estado.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("No stops configured")]
    EmptyIndex,
    #[error("No routes configured")]
    EmptyCatalog,
    #[error("Invalid report kind: {0}")]
    InvalidKind(String),
    #[error("Stop not found: {0}")]
    StopNotFound(String),
    #[error("Route not found: {0}")]
    RouteNotFound(String),
}

impl ResponseError for TransitError {
    fn status_code(&self) -> StatusCode {
        match self {
            TransitError::EmptyIndex | TransitError::EmptyCatalog => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            TransitError::InvalidKind(_) => StatusCode::BAD_REQUEST,
            TransitError::StopNotFound(_) | TransitError::RouteNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
