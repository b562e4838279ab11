use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::domain::indicators::{self, IndicatorFilter};
use crate::models::{Indicator, IndicatorWithPanel};

#[derive(Debug, Deserialize)]
pub struct PanelIndicatorsQuery {
    #[serde(default)]
    pub grouped: bool,
}

/// Indicators in one panel, either as a flat list or bucketed by first
/// letter when `?grouped=true`.
#[tracing::instrument(skip(state), fields(panel_id = %panel_id))]
pub async fn panel_indicators_handler(
    State(state): State<AppState>,
    Path(panel_id): Path<Uuid>,
    Query(query): Query<PanelIndicatorsQuery>,
) -> ApiResult<Response> {
    let rows = indicators::get_panel_indicators(&state.pool, panel_id).await?;

    if query.grouped {
        let groups = indicators::group_by_first_letter(rows);
        Ok(Json(groups).into_response())
    } else {
        Ok(Json(rows).into_response())
    }
}

pub async fn panel_indicator_count_handler(
    State(state): State<AppState>,
    Path(panel_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let count = indicators::count_panel_indicators(&state.pool, panel_id).await?;
    Ok(Json(json!({ "count": count })))
}

#[derive(Debug, Deserialize)]
pub struct IndicatorListQuery {
    pub panel_id: Option<Uuid>,
    pub search: Option<String>,
}

pub async fn indicators_handler(
    State(state): State<AppState>,
    Query(query): Query<IndicatorListQuery>,
) -> ApiResult<Json<Vec<Indicator>>> {
    let filter = IndicatorFilter {
        panel_id: query.panel_id,
        search: query.search,
    };
    let rows = indicators::get_indicators(&state.pool, &filter).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_indicators_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Indicator>>> {
    let rows = indicators::search_indicators(&state.pool, &query.q).await?;
    Ok(Json(rows))
}

#[tracing::instrument(skip(state), fields(indicator_id = %id))]
pub async fn indicator_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<IndicatorWithPanel>> {
    let indicator = indicators::get_indicator(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("indicator {} not found", id)))?;
    Ok(Json(indicator))
}
