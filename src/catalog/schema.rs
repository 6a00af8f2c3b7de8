use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Direction {
    pub id: String,
    #[serde(rename = "order_default", alias = "default_order")]
    pub default_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseGroup {
    pub id: String,
    pub direction_id: String,
    pub title: String,
    #[serde(default, rename = "subtitle", alias = "outcome")]
    pub outcome: Option<String>,
    #[serde(default)]
    pub order_in_direction: i64,
    #[serde(default)]
    pub course_slugs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionWeight {
    pub direction_id: String,
    pub source: String,
    pub source_value: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Answer {
    pub source: String,
    pub value: String,
}

impl Answer {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 3] = [
        EnrollmentStatus::NotStarted,
        EnrollmentStatus::InProgress,
        EnrollmentStatus::Completed,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl Display for EnrollmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown enrollment status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for EnrollmentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub course_slug: String,
    pub status: EnrollmentStatus,
}

impl EnrollmentRecord {
    pub fn new(course_slug: impl Into<String>, status: EnrollmentStatus) -> Self {
        Self {
            course_slug: course_slug.into(),
            status,
        }
    }
}
