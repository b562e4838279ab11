use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::domain::rankings;
use crate::domain::RankTier;
use crate::models::{Champion, RankingEntry, RankingStats};

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub sector: Option<String>,
    pub limit: Option<i64>,
}

#[tracing::instrument(skip(state))]
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<Vec<RankingEntry>>> {
    if matches!(query.limit, Some(limit) if limit <= 0) {
        return Err(ApiError::BadRequest("limit must be positive".to_string()));
    }

    let entries =
        rankings::get_leaderboard(&state.pool, query.sector.as_deref(), query.limit).await?;
    Ok(Json(entries))
}

#[derive(Serialize)]
pub struct ChampionRankingResponse {
    #[serde(flatten)]
    pub entry: RankingEntry,
    pub tier: RankTier,
    pub rank_label: String,
}

#[tracing::instrument(skip(state), fields(champion_id = %id))]
pub async fn champion_ranking_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChampionRankingResponse>> {
    let entry = rankings::get_champion_ranking(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("champion {} not found", id)))?;

    let tier = rankings::rank_tier(entry.champion.contribution_score);
    let rank_label = rankings::format_rank(entry.rank);
    Ok(Json(ChampionRankingResponse {
        entry,
        tier,
        rank_label,
    }))
}

pub async fn ranking_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<RankingStats>> {
    let stats = rankings::get_ranking_stats(&state.pool).await?;
    Ok(Json(stats))
}

pub async fn sectors_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let sectors = rankings::get_available_sectors(&state.pool).await?;
    Ok(Json(sectors))
}

#[derive(Debug, Deserialize)]
pub struct AwardRequest {
    pub points: i64,
}

#[tracing::instrument(skip(state), fields(champion_id = %id))]
pub async fn award_points_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AwardRequest>,
) -> ApiResult<Json<Champion>> {
    info!("Processing award request");

    let champion = rankings::award_points(&state.pool, id, body.points).await?;
    Ok(Json(champion))
}
