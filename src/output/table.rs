use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::catalog::{CatalogIssue, EnrollmentStatus};
use crate::roadmap::{DirectionScore, RoadmapResult};

pub fn render_roadmap_table(roadmap: &RoadmapResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Direction", "Group", "Outcome", "Progress", "Courses"]);

    let current = roadmap.current_group_id.as_deref();
    for (idx, step) in roadmap.steps.iter().enumerate() {
        let progress = if step.progress.is_empty() {
            Cell::new("pending").fg(Color::DarkGrey)
        } else if step.progress.is_finished() {
            Cell::new(format!("{}/{}", step.progress.completed, step.progress.total))
                .fg(Color::Green)
        } else {
            Cell::new(format!("{}/{}", step.progress.completed, step.progress.total))
        };
        let marker = if current == Some(step.group_id.as_str()) {
            Cell::new(format!("> {}", idx + 1)).fg(Color::Yellow)
        } else {
            Cell::new((idx + 1).to_string())
        };
        let courses = step
            .courses
            .iter()
            .map(|c| format!("{} {}", status_glyph(c.status), c.slug))
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(Row::from(vec![
            marker,
            Cell::new(&step.direction_id),
            Cell::new(&step.title),
            Cell::new(step.outcome.as_deref().unwrap_or("-")),
            progress,
            Cell::new(courses),
        ]));
    }

    let summary = match roadmap.current_step() {
        Some(step) => format!(
            "Current step: {} ({:.0}% complete)",
            step.title,
            step.progress.percent()
        ),
        None if roadmap.steps.is_empty() => "Roadmap is empty.".to_string(),
        None => "All steps complete.".to_string(),
    };
    format!("{table}\n{summary}")
}

pub fn render_scores_table(scores: &[DirectionScore]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Direction", "Score", "Default Order"]);
    for (idx, score) in scores.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            score.direction_id.clone(),
            format!("{:.2}", score.score),
            score.default_order.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_issues_table(issues: &[CatalogIssue]) -> String {
    if issues.is_empty() {
        return "Catalog has no integrity issues.".to_string();
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Issue"]);
    for issue in issues {
        table.add_row(vec![Cell::new(issue.to_string()).fg(Color::Red)]);
    }
    table.to_string()
}

fn status_glyph(status: EnrollmentStatus) -> &'static str {
    match status {
        EnrollmentStatus::NotStarted => "[ ]",
        EnrollmentStatus::InProgress => "[~]",
        EnrollmentStatus::Completed => "[x]",
    }
}
