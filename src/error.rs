use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::pagination_models::PaginationError;
use crate::store::StoreError;
use crate::utils::json_utils::indented_json;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    /// The request body could not be bound to the expected JSON shape.
    #[error("{0}")]
    Payload(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid pagination argument: {0}")]
    Pagination(#[from] PaginationError),
    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Payload(_) | ApiError::Store(StoreError::Constraint(_)) => {
                StatusCode::EXPECTATION_FAILED
            }
            ApiError::Store(StoreError::Pool(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(StoreError::Query(_))
            | ApiError::Pagination(_)
            | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, "request failed: {}", self);
        }
        indented_json(
            status,
            &ErrorBody {
                message: self.to_string(),
            },
        )
    }
}
