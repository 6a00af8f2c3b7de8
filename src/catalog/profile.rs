use serde::{Deserialize, Serialize};

use crate::catalog::Answer;

pub const SOURCE_GOALS: &str = "goals";
pub const SOURCE_PRIORITY_TRACKS: &str = "priority_tracks";
pub const SOURCE_CONTEXT: &str = "context";
pub const SOURCE_AI_LEVEL: &str = "ai_level";
pub const SOURCE_CODE_LEVEL: &str = "code_level";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub goals: Vec<Option<String>>,
    #[serde(default, alias = "priorityTracks")]
    pub priority_tracks: Vec<Option<String>>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default, alias = "aiLevel")]
    pub ai_level: Option<String>,
    #[serde(default, alias = "codeLevel")]
    pub code_level: Option<String>,
}

impl UserProfile {
    // Blank strings count as null; values are otherwise kept verbatim.
    pub fn answers(&self) -> Vec<Answer> {
        let mut answers = Vec::new();
        push_all(&mut answers, SOURCE_GOALS, &self.goals);
        push_all(&mut answers, SOURCE_PRIORITY_TRACKS, &self.priority_tracks);
        push_one(&mut answers, SOURCE_CONTEXT, self.context.as_deref());
        push_one(&mut answers, SOURCE_AI_LEVEL, self.ai_level.as_deref());
        push_one(&mut answers, SOURCE_CODE_LEVEL, self.code_level.as_deref());
        answers
    }
}

fn push_all(out: &mut Vec<Answer>, source: &str, values: &[Option<String>]) {
    for value in values {
        push_one(out, source, value.as_deref());
    }
}

fn push_one(out: &mut Vec<Answer>, source: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return;
    };
    out.push(Answer::new(source, value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_scalars_and_arrays() {
        let profile = UserProfile {
            goals: vec![Some("automation".into()), None, Some("career".into())],
            priority_tracks: vec![Some("agents".into())],
            context: Some("work".into()),
            ai_level: None,
            code_level: Some("  ".into()),
        };

        let answers = profile.answers();
        assert_eq!(
            answers,
            vec![
                Answer::new("goals", "automation"),
                Answer::new("goals", "career"),
                Answer::new("priority_tracks", "agents"),
                Answer::new("context", "work"),
            ]
        );
    }

    #[test]
    fn keeps_surrounding_whitespace_in_values() {
        let profile = UserProfile {
            goals: vec![Some(" automation".into())],
            context: Some("work ".into()),
            ..UserProfile::default()
        };

        assert_eq!(
            profile.answers(),
            vec![
                Answer::new("goals", " automation"),
                Answer::new("context", "work "),
            ]
        );
    }

    #[test]
    fn empty_profile_has_no_answers() {
        assert!(UserProfile::default().answers().is_empty());
    }

    #[test]
    fn accepts_nulls_inside_arrays() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"goals": ["automation", null], "priorityTracks": [], "aiLevel": "beginner"}"#,
        )
        .expect("profile should parse");
        assert_eq!(profile.answers().len(), 2);
    }
}
