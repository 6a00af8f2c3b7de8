use crate::catalog::{Answer, CourseGroup, Direction, DirectionWeight, EnrollmentRecord};
use crate::roadmap::scoring::rank_directions;
use crate::roadmap::steps::expand_steps;
use crate::roadmap::{RoadmapResult, Step};

/// Never fails: rules or groups naming unknown directions are skipped.
pub fn compute_roadmap(
    answers: &[Answer],
    directions: &[Direction],
    groups: &[CourseGroup],
    weights: &[DirectionWeight],
    enrollments: &[EnrollmentRecord],
) -> RoadmapResult {
    let ranked = rank_directions(answers, directions, weights);
    let steps = expand_steps(&ranked, groups, enrollments);
    let current_group_id = select_current_group(&steps).map(str::to_string);
    RoadmapResult {
        steps,
        current_group_id,
    }
}

pub fn select_current_group(steps: &[Step]) -> Option<&str> {
    steps
        .iter()
        .find(|step| step.progress.is_outstanding())
        .map(|step| step.group_id.as_str())
}
