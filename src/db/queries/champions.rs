use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::errors::Result;
use crate::db::tables;
use crate::models::{Champion, RankingStats};

const CHAMPION_COLUMNS: &str = "id, name, company, sector, contribution_score, \
     indicators_reviewed, panels_completed, updated_at";

/// Load champions with a positive score, best first. `sector` narrows the
/// result to one sector; a `None` limit returns every qualifying row.
#[tracing::instrument(skip(pool))]
pub async fn load_leaderboard(
    pool: &PgPool,
    sector: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<Champion>> {
    debug!("Loading leaderboard rows");

    // LIMIT NULL is unbounded in Postgres
    let sql = format!(
        r#"
        SELECT {CHAMPION_COLUMNS}
        FROM {table}
        WHERE contribution_score > 0
          AND ($1::text IS NULL OR sector = $1)
        ORDER BY contribution_score DESC
        LIMIT $2
        "#,
        table = tables::CHAMPIONS,
    );

    let rows = sqlx::query_as::<_, Champion>(&sql)
        .bind(sector)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    info!("Loaded {} leaderboard rows", rows.len());
    Ok(rows)
}

/// Fetch a single champion. Absent is `None`, not an error.
#[tracing::instrument(skip(pool), fields(champion_id = %id))]
pub async fn get_champion(pool: &PgPool, id: Uuid) -> Result<Option<Champion>> {
    let sql = format!(
        "SELECT {CHAMPION_COLUMNS} FROM {table} WHERE id = $1",
        table = tables::CHAMPIONS,
    );

    let row = sqlx::query_as::<_, Champion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Count champions strictly above a score. Rank = this count + 1.
#[tracing::instrument(skip(pool))]
pub async fn count_champions_above(pool: &PgPool, score: i64) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {table} WHERE contribution_score > $1",
        table = tables::CHAMPIONS,
    );

    let count: i64 = sqlx::query_scalar(&sql).bind(score).fetch_one(pool).await?;
    Ok(count)
}

/// Aggregate stats over champions with a positive score. The average is 0
/// when no champion qualifies.
#[tracing::instrument(skip(pool))]
pub async fn load_ranking_stats(pool: &PgPool) -> Result<RankingStats> {
    let sql = format!(
        r#"
        SELECT
            COUNT(*) AS champion_count,
            COALESCE(SUM(indicators_reviewed), 0)::bigint AS total_indicators_reviewed,
            COALESCE(SUM(panels_completed), 0)::bigint AS total_panels_completed,
            COALESCE(AVG(contribution_score), 0)::float8 AS average_score
        FROM {table}
        WHERE contribution_score > 0
        "#,
        table = tables::CHAMPIONS,
    );

    let stats = sqlx::query_as::<_, RankingStats>(&sql).fetch_one(pool).await?;
    Ok(stats)
}

/// Atomically add points to a champion's score and refresh its timestamp.
///
/// This is a single-statement increment: concurrent awards for the same
/// champion accumulate instead of overwriting each other. Returns the row
/// after the update, or `None` when the champion does not exist.
#[tracing::instrument(skip(pool), fields(champion_id = %id, points = points))]
pub async fn increment_score(pool: &PgPool, id: Uuid, points: i64) -> Result<Option<Champion>> {
    debug!("Incrementing champion score");

    let sql = format!(
        r#"
        UPDATE {table}
        SET contribution_score = contribution_score + $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {CHAMPION_COLUMNS}
        "#,
        table = tables::CHAMPIONS,
    );

    let row = sqlx::query_as::<_, Champion>(&sql)
        .bind(id)
        .bind(points)
        .fetch_optional(pool)
        .await?;

    if let Some(champion) = &row {
        info!(
            "Champion {} score is now {}",
            champion.id, champion.contribution_score
        );
    }
    Ok(row)
}

/// Distinct sectors among champions with a positive score, alphabetical.
#[tracing::instrument(skip(pool))]
pub async fn load_available_sectors(pool: &PgPool) -> Result<Vec<String>> {
    let sql = format!(
        r#"
        SELECT DISTINCT sector
        FROM {table}
        WHERE contribution_score > 0
        ORDER BY sector ASC
        "#,
        table = tables::CHAMPIONS,
    );

    let sectors: Vec<String> = sqlx::query_scalar(&sql).fetch_all(pool).await?;
    Ok(sectors)
}
