// Domain layer - business rules on top of the query modules, no HTTP concerns

pub mod indicators;
pub mod rankings;
pub mod reviews;

use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        if e.is_not_found() {
            DomainError::NotFound("Resource not found".to_string())
        } else {
            DomainError::Database(e.to_string())
        }
    }
}

// Re-export commonly used types and functions
pub use indicators::{group_by_first_letter, search_indicators};
pub use rankings::{format_rank, rank_tier, RankTier};
pub use reviews::{calculate_review_stats, determine_overall_status};
