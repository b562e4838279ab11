use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Review status shared by submissions and individual indicator reviews.
/// Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// A review is resolved once it is no longer pending.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// `champions` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Champion {
    pub id: Uuid,
    pub name: String,
    pub company: String,
    pub sector: String,
    pub contribution_score: i64,
    pub indicators_reviewed: i32,
    pub panels_completed: i32,
    pub updated_at: DateTime<Utc>,
}

/// `panels` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panel {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

/// `indicators` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Indicator {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub panel_id: Uuid,
}

/// An indicator joined with its parent panel, as returned by single-indicator
/// lookups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndicatorWithPanel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub panel_id: Uuid,
    pub panel_name: String,
    pub panel_category: String,
}

/// `panel_review_submissions` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PanelReviewSubmission {
    pub id: Uuid,
    pub champion_id: Uuid,
    pub panel_id: Uuid,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `panel_review_indicator_reviews` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndicatorReview {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub champion_id: Uuid,
    pub indicator_id: Uuid,
    pub status: ReviewStatus,
    pub sector: Option<String>,
    pub framework: Option<String>,
    pub current_tier: Option<String>,
    pub target_tier: Option<String>,
    pub rationale: Option<String>,
    pub reviewed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One per-indicator assessment inside a batch submission.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorAssessment {
    pub indicator_id: Uuid,
    pub status: ReviewStatus,
    pub sector: Option<String>,
    pub framework: Option<String>,
    pub current_tier: Option<String>,
    pub target_tier: Option<String>,
    pub rationale: Option<String>,
}

/// Derived per request, never persisted: a champion plus its 1-based rank.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub rank: i64,
    #[serde(flatten)]
    pub champion: Champion,
}

/// Aggregates over all champions with a positive score.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RankingStats {
    pub champion_count: i64,
    pub total_indicators_reviewed: i64,
    pub total_panels_completed: i64,
    pub average_score: f64,
}

/// Counts over one submission's indicator reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub total_reviews: u32,
    pub approved_reviews: u32,
    pub rejected_reviews: u32,
    pub pending_reviews: u32,
    pub credits_earned: u32,
}
