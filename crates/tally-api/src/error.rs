use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use tally_types::api::FlashResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Post id {0} doesn't exist.")]
    NotFound(i64),

    #[error("Forbidden")]
    Forbidden,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    /// Rejected form input. Rendered as a flash message, not an error page.
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            AppError::Validation(flash) => (status, Json(FlashResponse { flash })).into_response(),
            AppError::Internal(e) => {
                error!("{:#}", e);
                (status, "Internal server error").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
