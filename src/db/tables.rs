//! Centralized table names. Every query module references these constants so
//! a schema rename touches exactly one file.

pub const CHAMPIONS: &str = "champions";
pub const PANELS: &str = "panels";
pub const INDICATORS: &str = "indicators";
pub const PANEL_REVIEW_SUBMISSIONS: &str = "panel_review_submissions";
pub const PANEL_REVIEW_INDICATOR_REVIEWS: &str = "panel_review_indicator_reviews";
