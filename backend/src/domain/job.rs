//! Job catalog entity.
//!
//! Jobs are shared across users; nothing here carries an owner. Users are
//! only associated with a job through their orders.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::error::Error;
use crate::domain::validation::Violations;

/// Persisted job template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
}

/// Creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
}

impl JobDraft {
    /// Full-mode validation.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Violations::new();
        validate_title(&self.title, &mut violations);
        validate_description(&self.description, &mut violations);
        if self.category.trim().is_empty() {
            violations.push("category", "Category is required");
        }
        if self.duration.trim().is_empty() {
            violations.push("duration", "Duration is required");
        }
        violations.into_result()
    }
}

/// Partial update.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl JobPatch {
    /// Partial-mode validation: only supplied fields are checked.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Violations::new();
        if let Some(title) = &self.title {
            validate_title(title, &mut violations);
        }
        if let Some(description) = &self.description {
            validate_description(description, &mut violations);
        }
        if let Some(category) = &self.category
            && category.trim().is_empty()
        {
            violations.push("category", "Category is required");
        }
        if let Some(duration) = &self.duration
            && duration.trim().is_empty()
        {
            violations.push("duration", "Duration is required");
        }
        violations.into_result()
    }

    /// True when no field is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.duration.is_none()
    }
}

fn validate_title(value: &str, violations: &mut Violations) {
    if value.chars().count() < 5 {
        violations.push("title", "Job title must be at least 5 characters long");
    }
}

fn validate_description(value: &str, violations: &mut Violations) {
    if value.chars().count() < 10 {
        violations.push(
            "description",
            "Job description must be at least 10 characters long",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> JobDraft {
        JobDraft {
            title: "Logo design".to_owned(),
            category: "Design".to_owned(),
            description: "Full brand identity refresh".to_owned(),
            duration: "2-3 weeks".to_owned(),
        }
    }

    #[test]
    fn accepts_a_valid_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn short_title_and_description_both_reported() {
        let draft = JobDraft {
            title: "Logo".to_owned(),
            description: "short".to_owned(),
            ..valid_draft()
        };
        let error = draft.validate().expect_err("two fields rejected");
        let fields = error.field_errors().expect("field map");
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn patch_ignores_absent_fields() {
        let patch = JobPatch {
            duration: Some("1 month".to_owned()),
            ..JobPatch::default()
        };
        assert!(patch.validate().is_ok());
    }
}
