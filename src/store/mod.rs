pub mod catalog;
pub mod migrations;

use serde::Serialize;

use crate::catalog::{
    check_integrity, Answer, CatalogIssue, CourseGroup, Direction, DirectionWeight,
    EnrollmentRecord,
};
use crate::roadmap::{compute_roadmap, rank_directions, DirectionScore, RoadmapResult};

pub use catalog::CatalogStore;

#[derive(Debug, Clone, Serialize, Default)]
pub struct RoadmapInputs {
    pub answers: Vec<Answer>,
    pub directions: Vec<Direction>,
    pub groups: Vec<CourseGroup>,
    pub weights: Vec<DirectionWeight>,
    pub enrollments: Vec<EnrollmentRecord>,
}

impl RoadmapInputs {
    pub fn compute(&self) -> RoadmapResult {
        compute_roadmap(
            &self.answers,
            &self.directions,
            &self.groups,
            &self.weights,
            &self.enrollments,
        )
    }

    pub fn ranked_directions(&self) -> Vec<DirectionScore> {
        rank_directions(&self.answers, &self.directions, &self.weights)
    }

    pub fn issues(&self) -> Vec<CatalogIssue> {
        check_integrity(&self.directions, &self.groups, &self.weights)
    }
}
