use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::DomainError;
use crate::db::queries::champions as queries;
use crate::models::{Champion, RankingEntry, RankingStats};

/// Cosmetic tier labels derived from cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankTier {
    Newcomer,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl RankTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newcomer => "Newcomer",
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
        }
    }
}

// Descending thresholds; the first one at or below the score wins.
const TIER_THRESHOLDS: &[(i64, RankTier)] = &[
    (1000, RankTier::Diamond),
    (500, RankTier::Platinum),
    (250, RankTier::Gold),
    (100, RankTier::Silver),
    (50, RankTier::Bronze),
];

/// Tier for a cumulative score.
pub fn rank_tier(score: i64) -> RankTier {
    for (threshold, tier) in TIER_THRESHOLDS {
        if score >= *threshold {
            return *tier;
        }
    }
    RankTier::Newcomer
}

/// English ordinal for a 1-based rank: 1st, 2nd, 3rd, 4th, ... with the
/// 11th-13th exception.
pub fn format_rank(rank: i64) -> String {
    let suffix = match rank % 100 {
        11..=13 => "th",
        _ => match rank % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{}{}", rank, suffix)
}

/// Assign 1-based ranks by ordinal position. The input must already be in
/// leaderboard order; ties receive consecutive distinct ranks.
pub fn assign_ranks(champions: Vec<Champion>) -> Vec<RankingEntry> {
    champions
        .into_iter()
        .enumerate()
        .map(|(i, champion)| RankingEntry {
            rank: i as i64 + 1,
            champion,
        })
        .collect()
}

/// Champions with a positive score, best first, with ranks assigned.
#[tracing::instrument(skip(pool))]
pub async fn get_leaderboard(
    pool: &PgPool,
    sector: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<RankingEntry>, DomainError> {
    let champions = queries::load_leaderboard(pool, sector, limit).await?;
    Ok(assign_ranks(champions))
}

/// One champion's row plus its rank, computed as the number of champions with
/// a strictly greater score plus one. This agrees with leaderboard ordering
/// even under ties. `None` when the champion does not exist.
#[tracing::instrument(skip(pool), fields(champion_id = %id))]
pub async fn get_champion_ranking(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<RankingEntry>, DomainError> {
    let Some(champion) = queries::get_champion(pool, id).await? else {
        return Ok(None);
    };

    let above = queries::count_champions_above(pool, champion.contribution_score).await?;
    Ok(Some(RankingEntry {
        rank: above + 1,
        champion,
    }))
}

/// Aggregates over the active leaderboard population.
pub async fn get_ranking_stats(pool: &PgPool) -> Result<RankingStats, DomainError> {
    Ok(queries::load_ranking_stats(pool).await?)
}

/// Award points to a champion. The delta must be positive: scores only ever
/// increase. The increment is a single atomic statement, so concurrent awards
/// accumulate.
#[tracing::instrument(skip(pool), fields(champion_id = %id, points = points))]
pub async fn award_points(
    pool: &PgPool,
    id: Uuid,
    points: i64,
) -> Result<Champion, DomainError> {
    if points <= 0 {
        return Err(DomainError::Validation(
            "points awarded must be positive".to_string(),
        ));
    }

    let champion = queries::increment_score(pool, id, points)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("champion {} not found", id)))?;

    info!(
        "Awarded {} points to champion {} (now {})",
        points, champion.id, champion.contribution_score
    );
    Ok(champion)
}

/// Distinct sectors represented on the leaderboard, alphabetical.
pub async fn get_available_sectors(pool: &PgPool) -> Result<Vec<String>, DomainError> {
    Ok(queries::load_available_sectors(pool).await?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    fn champion(score: i64) -> Champion {
        Champion {
            id: Uuid::new_v4(),
            name: "Champion".to_string(),
            company: "Company".to_string(),
            sector: "Energy".to_string(),
            contribution_score: score,
            indicators_reviewed: 0,
            panels_completed: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn tier_is_the_greatest_threshold_at_or_below_the_score() {
        assert_eq!(rank_tier(1000), RankTier::Diamond);
        assert_eq!(rank_tier(500), RankTier::Platinum);
        assert_eq!(rank_tier(250), RankTier::Gold);
        assert_eq!(rank_tier(100), RankTier::Silver);
        assert_eq!(rank_tier(50), RankTier::Bronze);
        assert_eq!(rank_tier(0), RankTier::Newcomer);
    }

    #[test]
    fn tier_boundaries_do_not_bleed() {
        assert_eq!(rank_tier(999), RankTier::Platinum);
        assert_eq!(rank_tier(499), RankTier::Gold);
        assert_eq!(rank_tier(249), RankTier::Silver);
        assert_eq!(rank_tier(99), RankTier::Bronze);
        assert_eq!(rank_tier(49), RankTier::Newcomer);
        assert_eq!(rank_tier(1500), RankTier::Diamond);
    }

    #[test]
    fn ordinal_suffixes_follow_english_rules() {
        assert_eq!(format_rank(1), "1st");
        assert_eq!(format_rank(2), "2nd");
        assert_eq!(format_rank(3), "3rd");
        assert_eq!(format_rank(4), "4th");
        assert_eq!(format_rank(11), "11th");
        assert_eq!(format_rank(12), "12th");
        assert_eq!(format_rank(13), "13th");
        assert_eq!(format_rank(21), "21st");
        assert_eq!(format_rank(22), "22nd");
        assert_eq!(format_rank(103), "103rd");
        assert_eq!(format_rank(111), "111th");
        assert_eq!(format_rank(112), "112th");
    }

    #[test]
    fn ranks_are_one_based_ordinal_positions() {
        let entries = assign_ranks(vec![champion(300), champion(200), champion(100)]);
        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn tied_scores_get_consecutive_distinct_ranks() {
        let entries = assign_ranks(vec![champion(200), champion(200), champion(50)]);
        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        // no tie-sharing: ordinal position decides
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
