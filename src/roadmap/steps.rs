use std::collections::{HashMap, HashSet};

use crate::catalog::{CourseGroup, EnrollmentRecord, EnrollmentStatus};
use crate::roadmap::{CourseProgress, DirectionScore, Progress, Step};

pub fn expand_steps(
    ranked: &[DirectionScore],
    groups: &[CourseGroup],
    enrollments: &[EnrollmentRecord],
) -> Vec<Step> {
    let statuses: HashMap<&str, EnrollmentStatus> = enrollments
        .iter()
        .map(|record| (record.course_slug.as_str(), record.status))
        .collect();

    let mut emitted = HashSet::new();
    let mut steps = Vec::with_capacity(groups.len());
    for direction in ranked {
        if !emitted.insert(direction.direction_id.as_str()) {
            continue;
        }
        let mut in_direction = groups
            .iter()
            .filter(|group| group.direction_id == direction.direction_id)
            .collect::<Vec<_>>();
        in_direction.sort_by_key(|group| group.order_in_direction);
        steps.extend(in_direction.into_iter().map(|group| build_step(group, &statuses)));
    }
    steps
}

pub fn build_step(group: &CourseGroup, statuses: &HashMap<&str, EnrollmentStatus>) -> Step {
    let courses = group
        .course_slugs
        .iter()
        .map(|slug| CourseProgress {
            slug: slug.clone(),
            status: statuses.get(slug.as_str()).copied().unwrap_or_default(),
        })
        .collect::<Vec<_>>();
    let completed = courses
        .iter()
        .filter(|course| course.status == EnrollmentStatus::Completed)
        .count();

    Step {
        group_id: group.id.clone(),
        title: group.title.clone(),
        outcome: group.outcome.clone(),
        direction_id: group.direction_id.clone(),
        progress: Progress {
            completed,
            total: courses.len(),
        },
        courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[&str]) -> Vec<DirectionScore> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| DirectionScore {
                direction_id: id.to_string(),
                default_order: i as i64,
                score: 0.0,
            })
            .collect()
    }

    fn group(id: &str, direction_id: &str, order: i64, slugs: &[&str]) -> CourseGroup {
        CourseGroup {
            id: id.to_string(),
            direction_id: direction_id.to_string(),
            title: format!("Group {id}"),
            outcome: None,
            order_in_direction: order,
            course_slugs: slugs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn group_ids(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.group_id.as_str()).collect()
    }

    #[test]
    fn orders_direction_major_then_group_order() {
        let groups = vec![
            group("x2", "x", 2, &[]),
            group("y1", "y", 1, &[]),
            group("x1", "x", 1, &[]),
            group("y0", "y", 0, &[]),
        ];
        let steps = expand_steps(&ranked(&["y", "x"]), &groups, &[]);
        assert_eq!(group_ids(&steps), vec!["y0", "y1", "x1", "x2"]);
    }

    #[test]
    fn equal_group_order_keeps_catalog_position() {
        let groups = vec![
            group("b", "x", 1, &[]),
            group("a", "x", 1, &[]),
            group("c", "x", 0, &[]),
        ];
        let steps = expand_steps(&ranked(&["x"]), &groups, &[]);
        assert_eq!(group_ids(&steps), vec!["c", "b", "a"]);
    }

    #[test]
    fn skips_groups_of_unknown_directions() {
        let groups = vec![group("g", "ghost", 0, &["a"]), group("h", "x", 0, &[])];
        let steps = expand_steps(&ranked(&["x"]), &groups, &[]);
        assert_eq!(group_ids(&steps), vec!["h"]);
    }

    #[test]
    fn repeated_direction_ids_emit_groups_once() {
        let groups = vec![group("g", "x", 0, &[])];
        let steps = expand_steps(&ranked(&["x", "x"]), &groups, &[]);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn resolves_statuses_and_counts_completed() {
        let groups = vec![group("g", "x", 0, &["intro", "rag", "agents"])];
        let enrollments = vec![
            EnrollmentRecord::new("intro", EnrollmentStatus::Completed),
            EnrollmentRecord::new("rag", EnrollmentStatus::InProgress),
            EnrollmentRecord::new("unrelated", EnrollmentStatus::Completed),
        ];
        let steps = expand_steps(&ranked(&["x"]), &groups, &enrollments);
        let step = &steps[0];

        assert_eq!(step.progress, Progress { completed: 1, total: 3 });
        let statuses = step.courses.iter().map(|c| c.status).collect::<Vec<_>>();
        assert_eq!(
            statuses,
            vec![
                EnrollmentStatus::Completed,
                EnrollmentStatus::InProgress,
                EnrollmentStatus::NotStarted,
            ]
        );
        assert_eq!(step.courses[2].slug, "agents");
    }

    #[test]
    fn duplicate_slugs_count_toward_total() {
        let groups = vec![group("g", "x", 0, &["intro", "intro"])];
        let enrollments = vec![EnrollmentRecord::new("intro", EnrollmentStatus::Completed)];
        let steps = expand_steps(&ranked(&["x"]), &groups, &enrollments);
        assert_eq!(steps[0].progress, Progress { completed: 2, total: 2 });
    }

    #[test]
    fn last_enrollment_row_wins() {
        let groups = vec![group("g", "x", 0, &["intro"])];
        let enrollments = vec![
            EnrollmentRecord::new("intro", EnrollmentStatus::Completed),
            EnrollmentRecord::new("intro", EnrollmentStatus::InProgress),
        ];
        let steps = expand_steps(&ranked(&["x"]), &groups, &enrollments);
        assert_eq!(steps[0].courses[0].status, EnrollmentStatus::InProgress);
    }
}
