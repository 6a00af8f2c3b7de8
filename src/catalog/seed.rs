use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{CourseGroup, Direction, DirectionWeight};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogSeed {
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub course_groups: Vec<CourseGroup>,
    #[serde(default)]
    pub direction_weights: Vec<DirectionWeight>,
}

impl CatalogSeed {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading catalog: {}", path.display()))?;
        Self::from_json(&data)
            .with_context(|| format!("failed parsing catalog: {}", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
            && self.course_groups.is_empty()
            && self.direction_weights.is_empty()
    }
}
