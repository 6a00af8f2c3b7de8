use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::catalog::{
    CatalogSeed, CourseGroup, Direction, DirectionWeight, EnrollmentRecord, EnrollmentStatus,
    UserProfile,
};
use crate::store::migrations::BASE_MIGRATION;
use crate::store::RoadmapInputs;

pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed creating data directory: {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed opening database: {}", path.display()))?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(BASE_MIGRATION)?;
        Ok(())
    }

    /// Directions and groups upsert by id; a seed carrying weights replaces the
    /// whole rule table, so identical rules stay separate rows.
    pub fn seed(&mut self, seed: &CatalogSeed, replace: bool) -> Result<()> {
        let tx = self.conn.transaction()?;
        if replace {
            tx.execute_batch(
                "DELETE FROM direction_weights; DELETE FROM course_groups; DELETE FROM directions;",
            )?;
        } else if !seed.direction_weights.is_empty() {
            tx.execute("DELETE FROM direction_weights", [])?;
        }

        for direction in &seed.directions {
            tx.execute(
                r#"
INSERT INTO directions(id, order_default) VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET order_default = excluded.order_default
"#,
                params![direction.id, direction.default_order],
            )?;
        }

        for group in &seed.course_groups {
            tx.execute(
                r#"
INSERT INTO course_groups(id, direction_id, title, subtitle, order_in_direction, course_slugs)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(id) DO UPDATE SET
    direction_id = excluded.direction_id,
    title = excluded.title,
    subtitle = excluded.subtitle,
    order_in_direction = excluded.order_in_direction,
    course_slugs = excluded.course_slugs
"#,
                params![
                    group.id,
                    group.direction_id,
                    group.title,
                    group.outcome,
                    group.order_in_direction,
                    serde_json::to_string(&group.course_slugs)?
                ],
            )?;
        }

        for rule in &seed.direction_weights {
            tx.execute(
                r#"
INSERT INTO direction_weights(direction_id, source, source_value, weight)
VALUES (?1, ?2, ?3, ?4)
"#,
                params![rule.direction_id, rule.source, rule.source_value, rule.weight],
            )?;
        }

        tx.commit()?;
        debug!(
            directions = seed.directions.len(),
            groups = seed.course_groups.len(),
            weights = seed.direction_weights.len(),
            "catalog seeded"
        );
        Ok(())
    }

    pub fn load_directions(&self) -> Result<Vec<Direction>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, order_default FROM directions ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Direction {
                    id: row.get(0)?,
                    default_order: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn load_course_groups(&self) -> Result<Vec<CourseGroup>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT id, direction_id, title, subtitle, order_in_direction, course_slugs
FROM course_groups
ORDER BY rowid
"#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                let slugs_raw: String = row.get(5)?;
                Ok(CourseGroup {
                    id: row.get(0)?,
                    direction_id: row.get(1)?,
                    title: row.get(2)?,
                    outcome: row.get(3)?,
                    order_in_direction: row.get(4)?,
                    course_slugs: parse_json_column(5, &slugs_raw)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn load_direction_weights(&self) -> Result<Vec<DirectionWeight>> {
        let mut stmt = self.conn.prepare(
            "SELECT direction_id, source, source_value, weight FROM direction_weights ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DirectionWeight {
                    direction_id: row.get(0)?,
                    source: row.get(1)?,
                    source_value: row.get(2)?,
                    weight: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn upsert_profile(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO profiles(user_id, goals, priority_tracks, context, ai_level, code_level, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(user_id) DO UPDATE SET
    goals = excluded.goals,
    priority_tracks = excluded.priority_tracks,
    context = excluded.context,
    ai_level = excluded.ai_level,
    code_level = excluded.code_level,
    updated_at = excluded.updated_at
"#,
            params![
                user_id,
                serde_json::to_string(&profile.goals)?,
                serde_json::to_string(&profile.priority_tracks)?,
                profile.context,
                profile.ai_level,
                profile.code_level,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT goals, priority_tracks, context, ai_level, code_level
FROM profiles
WHERE user_id = ?1
"#,
        )?;
        let profile = stmt
            .query_row(params![user_id], |row| {
                let goals_raw: String = row.get(0)?;
                let tracks_raw: String = row.get(1)?;
                Ok(UserProfile {
                    goals: parse_json_column(0, &goals_raw)?,
                    priority_tracks: parse_json_column(1, &tracks_raw)?,
                    context: row.get(2)?,
                    ai_level: row.get(3)?,
                    code_level: row.get(4)?,
                })
            })
            .optional()?;
        Ok(profile)
    }

    pub fn set_enrollment(
        &self,
        user_id: &str,
        course_slug: &str,
        status: EnrollmentStatus,
    ) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO course_enrollments(user_id, course_slug, status, updated_at)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(user_id, course_slug) DO UPDATE SET
    status = excluded.status,
    updated_at = excluded.updated_at
"#,
            params![user_id, course_slug, status.as_slug(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn load_enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT course_slug, status
FROM course_enrollments
WHERE user_id = ?1
ORDER BY course_slug
"#,
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                let status_raw: String = row.get(1)?;
                Ok(EnrollmentRecord {
                    course_slug: row.get(0)?,
                    status: status_raw.parse().unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn load_inputs(&self, user_id: &str) -> Result<Option<RoadmapInputs>> {
        let Some(profile) = self.load_profile(user_id)? else {
            return Ok(None);
        };
        Ok(Some(RoadmapInputs {
            answers: profile.answers(),
            directions: self.load_directions()?,
            groups: self.load_course_groups()?,
            weights: self.load_direction_weights()?,
            enrollments: self.load_enrollments(user_id)?,
        }))
    }
}

fn parse_json_column<T: serde::de::DeserializeOwned>(
    index: usize,
    raw: &str,
) -> rusqlite::Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
