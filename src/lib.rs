pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use db::{create_pool, DbError};
pub use domain::{DomainError, RankTier};
pub use models::{
    Champion, Indicator, IndicatorReview, Panel, PanelReviewSubmission, RankingEntry,
    ReviewStatus,
};
