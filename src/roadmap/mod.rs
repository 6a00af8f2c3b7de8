pub mod engine;
pub mod scoring;
pub mod steps;

use serde::{Deserialize, Serialize};

use crate::catalog::EnrollmentStatus;

pub use engine::{compute_roadmap, select_current_group};
pub use scoring::{rank_directions, score_directions};
pub use steps::expand_steps;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    pub fn is_outstanding(&self) -> bool {
        !self.is_empty() && !self.is_finished()
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseProgress {
    pub slug: String,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub group_id: String,
    pub title: String,
    pub outcome: Option<String>,
    pub direction_id: String,
    pub progress: Progress,
    pub courses: Vec<CourseProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResult {
    pub steps: Vec<Step>,
    pub current_group_id: Option<String>,
}

impl RoadmapResult {
    pub fn current_step(&self) -> Option<&Step> {
        self.current_group_id.as_ref()?;
        self.steps.iter().find(|step| step.progress.is_outstanding())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectionScore {
    pub direction_id: String,
    pub default_order: i64,
    pub score: f64,
}
