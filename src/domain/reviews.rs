use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::DomainError;
use crate::db::queries::reviews as queries;
use crate::models::{
    IndicatorAssessment, IndicatorReview, PanelReviewSubmission, ReviewStats, ReviewStatus,
};

/// Credits granted per approved indicator review.
pub const CREDITS_PER_APPROVED_REVIEW: u32 = 10;

/// Start a review attempt for one champion+panel pair. The submission is
/// created `pending`; its status is only ever changed by
/// [`refresh_submission_status`].
pub async fn create_submission(
    pool: &PgPool,
    champion_id: Uuid,
    panel_id: Uuid,
) -> Result<PanelReviewSubmission, DomainError> {
    Ok(queries::insert_submission(pool, champion_id, panel_id).await?)
}

/// Fetch one submission; `None` when it does not exist.
pub async fn get_submission(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PanelReviewSubmission>, DomainError> {
    Ok(queries::get_submission(pool, id).await?)
}

/// All indicator reviews under a submission.
pub async fn get_submission_reviews(
    pool: &PgPool,
    submission_id: Uuid,
) -> Result<Vec<IndicatorReview>, DomainError> {
    Ok(queries::load_reviews(pool, submission_id).await?)
}

/// Insert one review per assessment, sequentially. A row that fails to insert
/// is logged and skipped; the call returns only the rows that made it in and
/// never aborts on partial failure.
#[tracing::instrument(skip(pool, assessments), fields(submission_id = %submission_id, batch = assessments.len()))]
pub async fn submit_indicator_reviews(
    pool: &PgPool,
    submission_id: Uuid,
    champion_id: Uuid,
    assessments: &[IndicatorAssessment],
) -> Result<Vec<IndicatorReview>, DomainError> {
    let mut inserted = Vec::with_capacity(assessments.len());

    for assessment in assessments {
        match queries::insert_indicator_review(pool, submission_id, champion_id, assessment).await
        {
            Ok(review) => inserted.push(review),
            Err(e) => {
                warn!(
                    "Skipping indicator review {} for submission {}: {}",
                    assessment.indicator_id, submission_id, e
                );
            }
        }
    }

    info!(
        "Inserted {}/{} indicator reviews for submission {}",
        inserted.len(),
        assessments.len(),
        submission_id
    );
    Ok(inserted)
}

/// A submission is complete once every child review has been resolved.
pub fn is_complete(statuses: &[ReviewStatus]) -> bool {
    statuses.iter().all(|s| s.is_resolved())
}

/// Derive a submission's overall status from its full review set.
///
/// Empty sets stay pending. All-approved sets are approved. A complete set
/// containing a rejection is rejected; a complete set without one falls
/// through to approved. Anything incomplete stays pending.
pub fn determine_overall_status(statuses: &[ReviewStatus]) -> ReviewStatus {
    if statuses.is_empty() {
        return ReviewStatus::Pending;
    }

    let complete = is_complete(statuses);

    if statuses.iter().all(|s| *s == ReviewStatus::Approved) {
        return ReviewStatus::Approved;
    }
    if complete && statuses.iter().any(|s| *s == ReviewStatus::Rejected) {
        return ReviewStatus::Rejected;
    }
    if complete {
        return ReviewStatus::Approved;
    }
    ReviewStatus::Pending
}

/// Recompute a submission's status from its current review set and persist
/// it. Returns the derived status.
#[tracing::instrument(skip(pool), fields(submission_id = %submission_id))]
pub async fn refresh_submission_status(
    pool: &PgPool,
    submission_id: Uuid,
) -> Result<ReviewStatus, DomainError> {
    let reviews = queries::load_reviews(pool, submission_id).await?;
    let statuses: Vec<ReviewStatus> = reviews.iter().map(|r| r.status).collect();
    let status = determine_overall_status(&statuses);

    let updated = queries::update_submission_status(pool, submission_id, status).await?;
    if !updated {
        return Err(DomainError::NotFound(format!(
            "submission {} not found",
            submission_id
        )));
    }

    Ok(status)
}

/// Per-status counts plus credits earned at the fixed per-approval rate.
pub fn calculate_review_stats(statuses: &[ReviewStatus]) -> ReviewStats {
    let approved = statuses.iter().filter(|s| **s == ReviewStatus::Approved).count() as u32;
    let rejected = statuses.iter().filter(|s| **s == ReviewStatus::Rejected).count() as u32;
    let pending = statuses.iter().filter(|s| **s == ReviewStatus::Pending).count() as u32;

    ReviewStats {
        total_reviews: statuses.len() as u32,
        approved_reviews: approved,
        rejected_reviews: rejected,
        pending_reviews: pending,
        credits_earned: approved * CREDITS_PER_APPROVED_REVIEW,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use ReviewStatus::{Approved, Pending, Rejected};

    #[test]
    fn empty_review_sets_stay_pending() {
        assert_eq!(determine_overall_status(&[]), Pending);
    }

    #[test]
    fn all_approved_is_approved() {
        assert_eq!(determine_overall_status(&[Approved, Approved]), Approved);
    }

    #[test]
    fn any_rejection_in_a_complete_set_is_rejected() {
        assert_eq!(determine_overall_status(&[Approved, Rejected]), Rejected);
        assert_eq!(determine_overall_status(&[Rejected, Rejected]), Rejected);
    }

    #[test]
    fn unresolved_reviews_keep_the_submission_pending() {
        assert_eq!(determine_overall_status(&[Approved, Pending]), Pending);
        assert_eq!(determine_overall_status(&[Pending]), Pending);
        assert_eq!(determine_overall_status(&[Rejected, Pending]), Pending);
    }

    #[test]
    fn completeness_requires_every_review_resolved() {
        assert!(is_complete(&[]));
        assert!(is_complete(&[Approved, Rejected]));
        assert!(!is_complete(&[Approved, Pending]));
    }

    #[test]
    fn stats_count_each_status_and_credit_approvals() {
        let stats = calculate_review_stats(&[Approved, Approved, Approved, Rejected, Pending]);
        assert_eq!(
            stats,
            ReviewStats {
                total_reviews: 5,
                approved_reviews: 3,
                rejected_reviews: 1,
                pending_reviews: 1,
                credits_earned: 30,
            }
        );
    }

    #[test]
    fn stats_on_an_empty_set_are_all_zero() {
        let stats = calculate_review_stats(&[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.credits_earned, 0);
    }
}
