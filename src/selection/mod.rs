//! Next-item selection.
//!
//! Under the Rasch model an item is most informative when its difficulty
//! sits closest to the learner's ability, so selection minimizes
//! |b - theta| over the unanswered pool. Ties break on the lowest item id
//! to keep selection reproducible.

use std::collections::HashSet;

use crate::scale;
use crate::types::ItemParameters;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The candidate pool is empty after excluding answered items. The
    /// caller has to intervene: broaden the pool or end the test.
    #[error("no unanswered item available")]
    NoItemAvailable,
}

/// Pick the most informative unanswered item for a learner at `theta`.
pub fn select_next_item<'a>(
    theta: f64,
    candidates: &'a [ItemParameters],
    answered_ids: &HashSet<String>,
) -> Result<&'a ItemParameters, SelectionError> {
    candidates
        .iter()
        .filter(|item| !answered_ids.contains(&item.item_id))
        .min_by(|a, b| information_order(theta, a, b))
        .ok_or(SelectionError::NoItemAvailable)
}

/// All unanswered items ordered from most to least informative, with the
/// same deterministic tie-break as `select_next_item`. Useful for callers
/// that prefetch a batch.
pub fn rank_candidates<'a>(
    theta: f64,
    candidates: &'a [ItemParameters],
    answered_ids: &HashSet<String>,
) -> Vec<&'a ItemParameters> {
    let mut ranked: Vec<&ItemParameters> = candidates
        .iter()
        .filter(|item| !answered_ids.contains(&item.item_id))
        .collect();
    ranked.sort_by(|a, b| information_order(theta, a, b));
    ranked
}

fn information_order(
    theta: f64,
    a: &ItemParameters,
    b: &ItemParameters,
) -> std::cmp::Ordering {
    let distance_a = (scale::to_numeric(a.difficulty) - theta).abs();
    let distance_b = (scale::to_numeric(b.difficulty) - theta).abs();
    distance_a
        .total_cmp(&distance_b)
        .then_with(|| a.item_id.cmp(&b.item_id))
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DifficultyLevel;

    fn item(id: &str, level: DifficultyLevel) -> ItemParameters {
        ItemParameters::new(id, "math", level)
    }

    #[test]
    fn test_selects_closest_difficulty() {
        let pool = vec![
            item("1", DifficultyLevel::Easy),
            item("2", DifficultyLevel::Hard),
        ];
        let chosen = select_next_item(1.8, &pool, &HashSet::new()).unwrap();
        assert_eq!(chosen.item_id, "2");
    }

    #[test]
    fn test_weak_learner_gets_easy_item() {
        let pool = vec![
            item("1", DifficultyLevel::VeryEasy),
            item("2", DifficultyLevel::Medium),
            item("3", DifficultyLevel::VeryHard),
        ];
        let chosen = select_next_item(-1.7, &pool, &HashSet::new()).unwrap();
        assert_eq!(chosen.item_id, "1");
    }

    #[test]
    fn test_ties_break_on_lowest_item_id() {
        let pool = vec![
            item("b", DifficultyLevel::Medium),
            item("a", DifficultyLevel::Medium),
        ];
        let chosen = select_next_item(0.0, &pool, &HashSet::new()).unwrap();
        assert_eq!(chosen.item_id, "a");
    }

    #[test]
    fn test_answered_items_are_excluded() {
        let pool = vec![
            item("1", DifficultyLevel::Medium),
            item("2", DifficultyLevel::Hard),
        ];
        let answered: HashSet<String> = ["1".to_string()].into_iter().collect();
        let chosen = select_next_item(0.0, &pool, &answered).unwrap();
        assert_eq!(chosen.item_id, "2");
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let err = select_next_item(0.0, &[], &HashSet::new()).unwrap_err();
        assert_eq!(err, SelectionError::NoItemAvailable);
    }

    #[test]
    fn test_fully_answered_pool_is_an_error() {
        let pool = vec![item("1", DifficultyLevel::Medium)];
        let answered: HashSet<String> = ["1".to_string()].into_iter().collect();
        assert_eq!(
            select_next_item(0.0, &pool, &answered),
            Err(SelectionError::NoItemAvailable)
        );
    }

    #[test]
    fn test_ranking_orders_by_information() {
        let pool = vec![
            item("1", DifficultyLevel::VeryEasy),
            item("2", DifficultyLevel::Easy),
            item("3", DifficultyLevel::Medium),
            item("4", DifficultyLevel::Hard),
        ];
        let ranked = rank_candidates(0.9, &pool, &HashSet::new());
        let ids: Vec<&str> = ranked.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn test_ranking_skips_answered() {
        let pool = vec![
            item("1", DifficultyLevel::Medium),
            item("2", DifficultyLevel::Hard),
        ];
        let answered: HashSet<String> = ["2".to_string()].into_iter().collect();
        let ranked = rank_candidates(1.0, &pool, &answered);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item_id, "1");
    }
}
