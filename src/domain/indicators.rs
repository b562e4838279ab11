use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::DomainError;
use crate::db::queries::indicators as queries;
use crate::models::{Indicator, IndicatorWithPanel};

/// Queries shorter than this never reach the backend.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Optional narrowing for [`get_indicators`].
#[derive(Debug, Clone, Default)]
pub struct IndicatorFilter {
    pub panel_id: Option<Uuid>,
    pub search: Option<String>,
}

/// All indicators in one panel, name ascending.
pub async fn get_panel_indicators(
    pool: &PgPool,
    panel_id: Uuid,
) -> Result<Vec<Indicator>, DomainError> {
    Ok(queries::list_by_panel(pool, panel_id).await?)
}

/// One indicator with its parent panel; `None` when it does not exist.
pub async fn get_indicator(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<IndicatorWithPanel>, DomainError> {
    Ok(queries::get_with_panel(pool, id).await?)
}

/// Filtered listing with optional panel scope and substring match.
pub async fn get_indicators(
    pool: &PgPool,
    filter: &IndicatorFilter,
) -> Result<Vec<Indicator>, DomainError> {
    let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Ok(queries::list_filtered(pool, filter.panel_id, search).await?)
}

/// Free-text search. Queries below [`MIN_QUERY_LENGTH`] return an empty
/// result without issuing a backend call; everything else is capped at
/// [`queries::MAX_SEARCH_RESULTS`] rows by the query itself.
#[tracing::instrument(skip(pool))]
pub async fn search_indicators(pool: &PgPool, query: &str) -> Result<Vec<Indicator>, DomainError> {
    let query = query.trim();
    if !meets_min_query_length(query) {
        debug!("Search query below minimum length, skipping backend call");
        return Ok(Vec::new());
    }

    Ok(queries::search(pool, query).await?)
}

/// Number of indicators in a panel.
pub async fn count_panel_indicators(pool: &PgPool, panel_id: Uuid) -> Result<i64, DomainError> {
    Ok(queries::count_by_panel(pool, panel_id).await?)
}

/// Guard backing [`search_indicators`]'s short-circuit.
pub fn meets_min_query_length(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LENGTH
}

/// Partition indicators into buckets keyed by the uppercased first letter of
/// the name, `'#'` when the name is empty. Input order is preserved within
/// each bucket; the map iterates its keys in sorted order.
pub fn group_by_first_letter(indicators: Vec<Indicator>) -> BTreeMap<char, Vec<Indicator>> {
    let mut groups: BTreeMap<char, Vec<Indicator>> = BTreeMap::new();
    for indicator in indicators {
        let key = indicator
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('#');
        groups.entry(key).or_default().push(indicator);
    }
    groups
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    fn indicator(name: &str) -> Indicator {
        Indicator {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            panel_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn groups_by_uppercased_first_letter_preserving_order() {
        let groups = group_by_first_letter(vec![
            indicator("Apple"),
            indicator("apricot"),
            indicator("Banana"),
        ]);

        let a: Vec<&str> = groups[&'A'].iter().map(|i| i.name.as_str()).collect();
        let b: Vec<&str> = groups[&'B'].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(a, vec!["Apple", "apricot"]);
        assert_eq!(b, vec!["Banana"]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn nameless_indicators_fall_into_the_hash_bucket() {
        let groups = group_by_first_letter(vec![indicator(""), indicator("Water use")]);

        assert_eq!(groups[&'#'].len(), 1);
        assert_eq!(groups[&'W'].len(), 1);
        // '#' sorts ahead of the letters
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!['#', 'W']);
    }

    #[test]
    fn single_character_queries_never_qualify() {
        assert!(!meets_min_query_length(""));
        assert!(!meets_min_query_length("a"));
        assert!(meets_min_query_length("ab"));
        assert!(meets_min_query_length("carbon"));
    }
}
