use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::catalog::{CourseGroup, Direction, DirectionWeight};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    DuplicateDirection {
        direction_id: String,
    },
    DuplicateGroup {
        group_id: String,
    },
    GroupWithUnknownDirection {
        group_id: String,
        direction_id: String,
    },
    WeightWithUnknownDirection {
        direction_id: String,
        source: String,
        source_value: String,
    },
}

impl Display for CatalogIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDirection { direction_id } => {
                write!(f, "direction {direction_id} is defined more than once")
            }
            Self::DuplicateGroup { group_id } => {
                write!(f, "course group {group_id} is defined more than once")
            }
            Self::GroupWithUnknownDirection {
                group_id,
                direction_id,
            } => write!(
                f,
                "course group {group_id} references unknown direction {direction_id}"
            ),
            Self::WeightWithUnknownDirection {
                direction_id,
                source,
                source_value,
            } => write!(
                f,
                "weight {source}={source_value} references unknown direction {direction_id}"
            ),
        }
    }
}

pub fn check_integrity(
    directions: &[Direction],
    groups: &[CourseGroup],
    weights: &[DirectionWeight],
) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let mut known = BTreeSet::new();
    for direction in directions {
        if !known.insert(direction.id.as_str()) {
            issues.push(CatalogIssue::DuplicateDirection {
                direction_id: direction.id.clone(),
            });
        }
    }

    let mut seen_groups = BTreeSet::new();
    for group in groups {
        if !seen_groups.insert(group.id.as_str()) {
            issues.push(CatalogIssue::DuplicateGroup {
                group_id: group.id.clone(),
            });
        }
        if !known.contains(group.direction_id.as_str()) {
            issues.push(CatalogIssue::GroupWithUnknownDirection {
                group_id: group.id.clone(),
                direction_id: group.direction_id.clone(),
            });
        }
    }

    for rule in weights {
        if !known.contains(rule.direction_id.as_str()) {
            issues.push(CatalogIssue::WeightWithUnknownDirection {
                direction_id: rule.direction_id.clone(),
                source: rule.source.clone(),
                source_value: rule.source_value.clone(),
            });
        }
    }

    issues
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

    fn group(id: &str, direction_id: &str) -> CourseGroup {
        CourseGroup {
            id: id.to_string(),
            direction_id: direction_id.to_string(),
            title: id.to_uppercase(),
            outcome: None,
            order_in_direction: 0,
            course_slugs: Vec::new(),
        }
    }

    #[test]
    fn clean_catalog_has_no_issues() {
        let directions = vec![direction("ai", 0)];
        let groups = vec![group("g1", "ai")];
        assert!(check_integrity(&directions, &groups, &[]).is_empty());
    }

    #[test]
    fn reports_dangling_and_duplicate_rows() {
        let directions = vec![direction("ai", 0), direction("ai", 1)];
        let groups = vec![group("g1", "ai"), group("g1", "ops")];
        let weights = vec![DirectionWeight {
            direction_id: "ghost".to_string(),
            source: "goals".to_string(),
            source_value: "x".to_string(),
            weight: 1.0,
        }];

        let issues = check_integrity(&directions, &groups, &weights);
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&CatalogIssue::GroupWithUnknownDirection {
            group_id: "g1".to_string(),
            direction_id: "ops".to_string(),
        }));
        assert_eq!(
            issues[3].to_string(),
            "weight goals=x references unknown direction ghost"
        );
    }
}
