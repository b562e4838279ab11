use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[test]
fn review_status_round_trips_through_lowercase_text() {
    assert_eq!(ReviewStatus::Pending.as_str(), "pending");
    assert_eq!(ReviewStatus::Approved.as_str(), "approved");
    assert_eq!(ReviewStatus::Rejected.as_str(), "rejected");

    let parsed: ReviewStatus = serde_json::from_value(json!("approved")).unwrap();
    assert_eq!(parsed, ReviewStatus::Approved);
    assert_eq!(
        serde_json::to_value(ReviewStatus::Rejected).unwrap(),
        json!("rejected")
    );
}

#[test]
fn only_pending_is_unresolved() {
    assert!(!ReviewStatus::Pending.is_resolved());
    assert!(ReviewStatus::Approved.is_resolved());
    assert!(ReviewStatus::Rejected.is_resolved());
}

#[test]
fn ranking_entry_serializes_flat() {
    let champion = Champion {
        id: uuid::Uuid::nil(),
        name: "Dana Reyes".to_string(),
        company: "Veridian Group".to_string(),
        sector: "Energy".to_string(),
        contribution_score: 120,
        indicators_reviewed: 14,
        panels_completed: 2,
        updated_at: chrono::Utc::now(),
    };
    let entry = RankingEntry { rank: 3, champion };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["rank"], json!(3));
    // flattened champion fields sit at the top level
    assert_eq!(value["name"], json!("Dana Reyes"));
    assert_eq!(value["contribution_score"], json!(120));
}
