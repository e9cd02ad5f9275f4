use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::db::DbError;
use crate::models::*;

type ApiResult<T> = Result<T, ApiError>;

/// Run a database call off the async runtime.
async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, DbError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("database task failed: {e}")))?
        .map_err(ApiError::from)
}

pub async fn create_feature(
    State(state): State<AppState>,
    Json(input): Json<CreateFeatureInput>,
) -> ApiResult<(StatusCode, Json<Feature>)> {
    let db = state.db.clone();
    let feature = blocking(move || db.create_feature(input)).await?;

    tracing::info!("Created feature with ID: {}", feature.id);
    Ok((StatusCode::CREATED, Json(feature)))
}

pub async fn create_vote(
    State(state): State<AppState>,
    Json(input): Json<CreateVoteInput>,
) -> ApiResult<(StatusCode, Json<Vote>)> {
    let db = state.db.clone();
    let vote = blocking(move || db.cast_vote(input)).await?;

    tracing::info!("Vote created with ID: {} for feature: {}", vote.id, vote.feature_id);
    Ok((StatusCode::CREATED, Json(vote)))
}

pub async fn list_features(State(state): State<AppState>) -> ApiResult<Json<Vec<Feature>>> {
    let db = state.db.clone();
    let features = blocking(move || db.get_all_features()).await?;
    Ok(Json(features))
}

pub async fn get_feature(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Feature>> {
    let db = state.db.clone();
    blocking(move || db.get_feature(id))
        .await?
        .map(Json)
        .ok_or_else(ApiError::feature_not_found)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
