use std::collections::{BTreeMap, HashSet};

use crate::catalog::{Answer, Direction, DirectionWeight};
use crate::roadmap::DirectionScore;

pub fn score_directions(
    answers: &[Answer],
    directions: &[Direction],
    weights: &[DirectionWeight],
) -> BTreeMap<String, f64> {
    let answer_set: HashSet<(&str, &str)> = answers
        .iter()
        .map(|a| (a.source.as_str(), a.value.as_str()))
        .collect();
    let zeroed: BTreeMap<&str, f64> = directions.iter().map(|d| (d.id.as_str(), 0.0)).collect();

    weights
        .iter()
        .filter(|rule| answer_set.contains(&(rule.source.as_str(), rule.source_value.as_str())))
        .fold(zeroed, |mut scores, rule| {
            if let Some(score) = scores.get_mut(rule.direction_id.as_str()) {
                *score += rule.weight;
            }
            scores
        })
        .into_iter()
        .map(|(id, score)| (id.to_string(), score))
        .collect()
}

// sort_by is stable: full ties keep catalog order.
pub fn rank_directions(
    answers: &[Answer],
    directions: &[Direction],
    weights: &[DirectionWeight],
) -> Vec<DirectionScore> {
    let scores = score_directions(answers, directions, weights);
    let mut ranked = directions
        .iter()
        .map(|direction| DirectionScore {
            direction_id: direction.id.clone(),
            default_order: direction.default_order,
            score: scores.get(&direction.id).copied().unwrap_or(0.0),
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.default_order.cmp(&b.default_order))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direction(id: &str, order: i64) -> Direction {
        Direction {
            id: id.to_string(),
            default_order: order,
        }
    }

    fn weight(direction_id: &str, source: &str, value: &str, weight: f64) -> DirectionWeight {
        DirectionWeight {
            direction_id: direction_id.to_string(),
            source: source.to_string(),
            source_value: value.to_string(),
            weight,
        }
    }

    fn ids(ranked: &[DirectionScore]) -> Vec<&str> {
        ranked.iter().map(|d| d.direction_id.as_str()).collect()
    }

    #[test]
    fn matching_rule_lifts_direction_above_default_order() {
        let directions = vec![direction("x", 0), direction("y", 1)];
        let weights = vec![weight("y", "goals", "automation", 10.0)];
        let answers = vec![Answer::new("goals", "automation")];

        let scores = score_directions(&answers, &directions, &weights);
        assert_eq!(scores.get("x"), Some(&0.0));
        assert_eq!(scores.get("y"), Some(&10.0));
        assert_eq!(ids(&rank_directions(&answers, &directions, &weights)), vec!["y", "x"]);
    }

    #[test]
    fn falls_back_to_default_order_without_matches() {
        let directions = vec![direction("c", 2), direction("a", 0), direction("b", 1)];
        let weights = vec![weight("c", "goals", "career", 5.0)];
        let answers = vec![Answer::new("goals", "hobby")];

        let ranked = rank_directions(&answers, &directions, &weights);
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
        assert!(ranked.iter().all(|d| d.score == 0.0));
        assert_eq!(ids(&rank_directions(&answers, &directions, &[])), vec!["a", "b", "c"]);
    }

    #[test]
    fn matching_rules_accumulate() {
        let directions = vec![direction("ai", 0)];
        let weights = vec![
            weight("ai", "goals", "automation", 3.0),
            weight("ai", "context", "work", 4.5),
            weight("ai", "context", "school", 100.0),
        ];
        let answers = vec![Answer::new("goals", "automation"), Answer::new("context", "work")];

        let scores = score_directions(&answers, &directions, &weights);
        assert!((scores["ai"] - 7.5).abs() < 1e-9);
    }

    #[test]
    fn duplicate_answers_do_not_double_count() {
        let directions = vec![direction("ai", 0)];
        let weights = vec![weight("ai", "goals", "automation", 2.0)];
        let answers = vec![
            Answer::new("goals", "automation"),
            Answer::new("goals", "automation"),
        ];

        assert_eq!(score_directions(&answers, &directions, &weights)["ai"], 2.0);
    }

    #[test]
    fn source_must_match_as_well_as_value() {
        let directions = vec![direction("ai", 0)];
        let weights = vec![weight("ai", "goals", "automation", 2.0)];
        let answers = vec![Answer::new("priority_tracks", "automation")];

        assert_eq!(score_directions(&answers, &directions, &weights)["ai"], 0.0);
    }

    #[test]
    fn rules_for_unknown_directions_are_ignored() {
        let directions = vec![direction("ai", 0)];
        let weights = vec![weight("ghost", "goals", "automation", 9.0)];
        let answers = vec![Answer::new("goals", "automation")];

        let scores = score_directions(&answers, &directions, &weights);
        assert_eq!(scores.len(), 1);
        assert!(!scores.contains_key("ghost"));
    }

    #[test]
    fn full_ties_keep_catalog_order() {
        let directions = vec![direction("second", 1), direction("first", 1), direction("zero", 0)];
        let ranked = rank_directions(&[], &directions, &[]);
        assert_eq!(ids(&ranked), vec!["zero", "second", "first"]);
    }

    #[test]
    fn negative_weights_push_directions_down() {
        let directions = vec![direction("a", 0), direction("b", 1)];
        let weights = vec![weight("a", "ai_level", "none", -1.0)];
        let answers = vec![Answer::new("ai_level", "none")];

        assert_eq!(ids(&rank_directions(&answers, &directions, &weights)), vec!["b", "a"]);
    }
}
