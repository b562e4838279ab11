use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::errors::Result;
use crate::db::tables;
use crate::models::{IndicatorAssessment, IndicatorReview, PanelReviewSubmission, ReviewStatus};

const SUBMISSION_COLUMNS: &str = "id, champion_id, panel_id, status, created_at, updated_at";

const REVIEW_COLUMNS: &str = "id, submission_id, champion_id, indicator_id, status, \
     sector, framework, current_tier, target_tier, rationale, reviewed_at, updated_at";

/// Create a submission for one champion+panel review attempt. The status
/// always starts out `pending` regardless of caller input.
#[tracing::instrument(skip(pool), fields(champion_id = %champion_id, panel_id = %panel_id))]
pub async fn insert_submission(
    pool: &PgPool,
    champion_id: Uuid,
    panel_id: Uuid,
) -> Result<PanelReviewSubmission> {
    debug!("Creating panel review submission");

    let sql = format!(
        r#"
        INSERT INTO {table} (id, champion_id, panel_id, status, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, 'pending', NOW(), NOW())
        RETURNING {SUBMISSION_COLUMNS}
        "#,
        table = tables::PANEL_REVIEW_SUBMISSIONS,
    );

    let submission = sqlx::query_as::<_, PanelReviewSubmission>(&sql)
        .bind(champion_id)
        .bind(panel_id)
        .fetch_one(pool)
        .await?;

    info!("Created submission {}", submission.id);
    Ok(submission)
}

/// Fetch one submission. Absent is `None`, not an error.
#[tracing::instrument(skip(pool), fields(submission_id = %id))]
pub async fn get_submission(pool: &PgPool, id: Uuid) -> Result<Option<PanelReviewSubmission>> {
    let sql = format!(
        "SELECT {SUBMISSION_COLUMNS} FROM {table} WHERE id = $1",
        table = tables::PANEL_REVIEW_SUBMISSIONS,
    );

    let row = sqlx::query_as::<_, PanelReviewSubmission>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Insert a single indicator review under a submission.
#[tracing::instrument(skip(pool, assessment), fields(submission_id = %submission_id, indicator_id = %assessment.indicator_id))]
pub async fn insert_indicator_review(
    pool: &PgPool,
    submission_id: Uuid,
    champion_id: Uuid,
    assessment: &IndicatorAssessment,
) -> Result<IndicatorReview> {
    let sql = format!(
        r#"
        INSERT INTO {table} (
            id, submission_id, champion_id, indicator_id, status,
            sector, framework, current_tier, target_tier, rationale,
            reviewed_at, updated_at
        )
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
        RETURNING {REVIEW_COLUMNS}
        "#,
        table = tables::PANEL_REVIEW_INDICATOR_REVIEWS,
    );

    let review = sqlx::query_as::<_, IndicatorReview>(&sql)
        .bind(submission_id)
        .bind(champion_id)
        .bind(assessment.indicator_id)
        .bind(assessment.status)
        .bind(assessment.sector.as_deref())
        .bind(assessment.framework.as_deref())
        .bind(assessment.current_tier.as_deref())
        .bind(assessment.target_tier.as_deref())
        .bind(assessment.rationale.as_deref())
        .fetch_one(pool)
        .await?;

    Ok(review)
}

/// All indicator reviews under a submission, oldest first.
#[tracing::instrument(skip(pool), fields(submission_id = %submission_id))]
pub async fn load_reviews(pool: &PgPool, submission_id: Uuid) -> Result<Vec<IndicatorReview>> {
    let sql = format!(
        r#"
        SELECT {REVIEW_COLUMNS}
        FROM {table}
        WHERE submission_id = $1
        ORDER BY reviewed_at ASC
        "#,
        table = tables::PANEL_REVIEW_INDICATOR_REVIEWS,
    );

    let rows = sqlx::query_as::<_, IndicatorReview>(&sql)
        .bind(submission_id)
        .fetch_all(pool)
        .await?;

    debug!("Loaded {} reviews for submission {}", rows.len(), submission_id);
    Ok(rows)
}

/// Persist a recomputed submission status. Returns false when the submission
/// does not exist.
#[tracing::instrument(skip(pool), fields(submission_id = %id, status = status.as_str()))]
pub async fn update_submission_status(
    pool: &PgPool,
    id: Uuid,
    status: ReviewStatus,
) -> Result<bool> {
    let sql = format!(
        r#"
        UPDATE {table}
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        "#,
        table = tables::PANEL_REVIEW_SUBMISSIONS,
    );

    let result = sqlx::query(&sql).bind(id).bind(status).execute(pool).await?;

    let updated = result.rows_affected() > 0;
    if updated {
        info!("Submission {} status set to {}", id, status.as_str());
    }
    Ok(updated)
}
