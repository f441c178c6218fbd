use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalError(String),
    DomainError(domain::errors::DomainError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<domain::errors::DomainError> for ApiError {
    fn from(err: domain::errors::DomainError) -> Self {
        ApiError::DomainError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONN_ERROR",
                    "Internal server error".to_string(),
                )
            }
            ApiError::DomainError(err) => {
                use domain::errors::DomainError;
                let status = match &err {
                    DomainError::NotFound(_) | DomainError::TradeNotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
                    DomainError::ValidationError(_)
                    | DomainError::InvalidState(_)
                    | DomainError::NotYourTurn(_)
                    | DomainError::PlayerUnavailable(_)
                    | DomainError::TradeExpired(_) => StatusCode::BAD_REQUEST,
                    DomainError::Conflict(_) => StatusCode::CONFLICT,
                    DomainError::StorageError(_) | DomainError::InternalError(_) => {
                        tracing::error!("Storage-layer error: {}", err);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.code(), err.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
