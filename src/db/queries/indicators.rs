use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::errors::Result;
use crate::db::tables;
use crate::models::{Indicator, IndicatorWithPanel};

/// Hard cap on free-text search results.
pub const MAX_SEARCH_RESULTS: i64 = 50;

const INDICATOR_COLUMNS: &str = "id, name, description, panel_id";

/// All indicators belonging to one panel, name ascending.
#[tracing::instrument(skip(pool), fields(panel_id = %panel_id))]
pub async fn list_by_panel(pool: &PgPool, panel_id: Uuid) -> Result<Vec<Indicator>> {
    debug!("Listing indicators for panel");

    let sql = format!(
        r#"
        SELECT {INDICATOR_COLUMNS}
        FROM {table}
        WHERE panel_id = $1
        ORDER BY name ASC
        "#,
        table = tables::INDICATORS,
    );

    let rows = sqlx::query_as::<_, Indicator>(&sql)
        .bind(panel_id)
        .fetch_all(pool)
        .await?;

    info!("Loaded {} indicators for panel {}", rows.len(), panel_id);
    Ok(rows)
}

/// One indicator joined with its parent panel. Absent is `None`, not an error.
#[tracing::instrument(skip(pool), fields(indicator_id = %id))]
pub async fn get_with_panel(pool: &PgPool, id: Uuid) -> Result<Option<IndicatorWithPanel>> {
    let sql = format!(
        r#"
        SELECT
            i.id, i.name, i.description, i.panel_id,
            p.name AS panel_name, p.category AS panel_category
        FROM {indicators} i
        JOIN {panels} p ON p.id = i.panel_id
        WHERE i.id = $1
        "#,
        indicators = tables::INDICATORS,
        panels = tables::PANELS,
    );

    let row = sqlx::query_as::<_, IndicatorWithPanel>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Filtered listing: optional panel scope plus an optional case-insensitive
/// substring match against name or description. Name ascending.
#[tracing::instrument(skip(pool))]
pub async fn list_filtered(
    pool: &PgPool,
    panel_id: Option<Uuid>,
    search: Option<&str>,
) -> Result<Vec<Indicator>> {
    debug!("Listing indicators with filters");

    let sql = format!(
        r#"
        SELECT {INDICATOR_COLUMNS}
        FROM {table}
        WHERE ($1::uuid IS NULL OR panel_id = $1)
          AND ($2::text IS NULL
               OR name ILIKE '%' || $2 || '%'
               OR description ILIKE '%' || $2 || '%')
        ORDER BY name ASC
        "#,
        table = tables::INDICATORS,
    );

    let rows = sqlx::query_as::<_, Indicator>(&sql)
        .bind(panel_id)
        .bind(search)
        .fetch_all(pool)
        .await?;

    info!("Loaded {} filtered indicators", rows.len());
    Ok(rows)
}

/// Free-text search over name and description, capped at
/// [`MAX_SEARCH_RESULTS`] rows. Minimum query length is the caller's job.
#[tracing::instrument(skip(pool))]
pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Indicator>> {
    debug!("Searching indicators");

    let sql = format!(
        r#"
        SELECT {INDICATOR_COLUMNS}
        FROM {table}
        WHERE name ILIKE '%' || $1 || '%'
           OR description ILIKE '%' || $1 || '%'
        ORDER BY name ASC
        LIMIT $2
        "#,
        table = tables::INDICATORS,
    );

    let rows = sqlx::query_as::<_, Indicator>(&sql)
        .bind(query)
        .bind(MAX_SEARCH_RESULTS)
        .fetch_all(pool)
        .await?;

    info!("Search matched {} indicators", rows.len());
    Ok(rows)
}

/// Number of indicators in one panel.
#[tracing::instrument(skip(pool), fields(panel_id = %panel_id))]
pub async fn count_by_panel(pool: &PgPool, panel_id: Uuid) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {table} WHERE panel_id = $1",
        table = tables::INDICATORS,
    );

    let count: i64 = sqlx::query_scalar(&sql)
        .bind(panel_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
