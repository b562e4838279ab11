use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::domain::reviews;
use crate::models::{
    IndicatorAssessment, IndicatorReview, PanelReviewSubmission, ReviewStats,
};

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub champion_id: Uuid,
    pub panel_id: Uuid,
}

#[tracing::instrument(skip(state, body), fields(champion_id = %body.champion_id, panel_id = %body.panel_id))]
pub async fn create_submission_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateSubmissionRequest>,
) -> ApiResult<Json<PanelReviewSubmission>> {
    info!("Creating panel review submission");

    let submission =
        reviews::create_submission(&state.pool, body.champion_id, body.panel_id).await?;
    Ok(Json(submission))
}

#[derive(Serialize)]
pub struct SubmissionDetailResponse {
    #[serde(flatten)]
    pub submission: PanelReviewSubmission,
    pub reviews: Vec<IndicatorReview>,
    pub stats: ReviewStats,
}

#[tracing::instrument(skip(state), fields(submission_id = %id))]
pub async fn get_submission_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SubmissionDetailResponse>> {
    let submission = reviews::get_submission(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("submission {} not found", id)))?;

    let review_rows = reviews::get_submission_reviews(&state.pool, id).await?;
    let statuses: Vec<_> = review_rows.iter().map(|r| r.status).collect();
    let stats = reviews::calculate_review_stats(&statuses);

    Ok(Json(SubmissionDetailResponse {
        submission,
        reviews: review_rows,
        stats,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewsRequest {
    pub champion_id: Uuid,
    pub reviews: Vec<IndicatorAssessment>,
}

#[derive(Serialize)]
pub struct SubmitReviewsResponse {
    pub submitted: usize,
    pub skipped: usize,
    pub reviews: Vec<IndicatorReview>,
}

#[tracing::instrument(skip(state, body), fields(submission_id = %id, batch = body.reviews.len()))]
pub async fn submit_reviews_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitReviewsRequest>,
) -> ApiResult<Json<SubmitReviewsResponse>> {
    if body.reviews.is_empty() {
        return Err(ApiError::BadRequest(
            "review batch must not be empty".to_string(),
        ));
    }

    // The submission must exist before reviews can hang off it
    reviews::get_submission(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("submission {} not found", id)))?;

    let inserted =
        reviews::submit_indicator_reviews(&state.pool, id, body.champion_id, &body.reviews)
            .await?;

    let skipped = body.reviews.len() - inserted.len();
    Ok(Json(SubmitReviewsResponse {
        submitted: inserted.len(),
        skipped,
        reviews: inserted,
    }))
}

#[tracing::instrument(skip(state), fields(submission_id = %id))]
pub async fn refresh_status_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let status = reviews::refresh_submission_status(&state.pool, id).await?;
    Ok(Json(json!({ "status": status })))
}
