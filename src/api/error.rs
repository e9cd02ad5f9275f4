use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Carries the real cause for the log; clients only see a generic message.
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn feature_not_found() -> Self {
        Self::NotFound("Feature not found".into())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Invalid(e) => Self::BadRequest(e.to_string()),
            DbError::FeatureNotFound(_) => Self::feature_not_found(),
            DbError::DuplicateVote { .. } => {
                Self::Conflict("User has already voted for this feature".into())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::Internal(cause) => {
                tracing::error!("Internal error: {}", cause);
                INTERNAL_MESSAGE.to_string()
            }
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg,
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
