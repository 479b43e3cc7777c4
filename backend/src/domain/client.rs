//! Client entity, creation draft, and partial patch.
//!
//! A client is always owned by exactly one user; `user_id` is set at
//! creation and never changes afterwards.

use serde::Deserialize;

use crate::domain::error::Error;
use crate::domain::validation::{Violations, client_name_regex, email_regex, phone_regex};

/// Persisted client record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: String,
    pub user_id: i32,
}

/// Creation payload. The owner is supplied by the service from the acting
/// user, never by the caller's field map.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub notes: String,
}

impl ClientDraft {
    /// Full-mode validation: all required fields checked.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Violations::new();
        validate_name(&self.name, &mut violations);
        validate_email(&self.email, &mut violations);
        validate_phone(&self.phone, &mut violations);
        validate_notes(&self.notes, &mut violations);
        violations.into_result()
    }
}

/// Partial update. Absent fields are left untouched; `company` and
/// `address` distinguish "unchanged" (`None`) from "cleared"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub notes: Option<String>,
}

impl ClientPatch {
    /// Partial-mode validation: only supplied fields are checked.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Violations::new();
        if let Some(name) = &self.name {
            validate_name(name, &mut violations);
        }
        if let Some(email) = &self.email {
            validate_email(email, &mut violations);
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone, &mut violations);
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes, &mut violations);
        }
        violations.into_result()
    }

    /// True when no field is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.address.is_none()
            && self.notes.is_none()
    }
}

fn validate_name(value: &str, violations: &mut Violations) {
    let trimmed = value.trim();
    if trimmed.chars().count() < 2 {
        violations.push("name", "Client name must be at least 2 characters long");
        return;
    }
    if trimmed.chars().count() > 30 {
        violations.push("name", "Client name must be 30 characters or less");
        return;
    }
    if !client_name_regex().is_match(trimmed) {
        violations.push(
            "name",
            "Client name can only contain letters, numbers, spaces, hyphens, apostrophes, and periods",
        );
    }
}

fn validate_email(value: &str, violations: &mut Violations) {
    if value.len() < 5 {
        violations.push("email", "Email must be at least 5 characters long");
        return;
    }
    if !email_regex().is_match(value) {
        violations.push("email", "Invalid email format");
    }
}

fn validate_phone(value: &str, violations: &mut Violations) {
    if value.is_empty() {
        violations.push("phone", "Phone number is required");
        return;
    }
    if !phone_regex().is_match(value) {
        violations.push("phone", "Phone number must be in format: ###-###-####");
    }
}

fn validate_notes(value: &str, violations: &mut Violations) {
    let trimmed = value.trim();
    if trimmed.chars().count() < 20 {
        violations.push("notes", "Client notes must be at least 20 characters long");
        return;
    }
    if trimmed.chars().count() > 1000 {
        violations.push("notes", "Client notes must be 1000 characters or less");
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn valid_draft() -> ClientDraft {
        ClientDraft {
            name: "Acme Studios".to_owned(),
            email: "contact@acme.example".to_owned(),
            phone: "555-123-4567".to_owned(),
            company: Some("Acme".to_owned()),
            address: None,
            notes: "Long-standing retainer client, invoiced monthly.".to_owned(),
        }
    }

    #[test]
    fn accepts_a_fully_valid_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[rstest]
    #[case("A", "Client name must be at least 2 characters long")]
    #[case(
        "This client name is considerably longer than thirty characters",
        "Client name must be 30 characters or less"
    )]
    #[case(
        "Bad|Name",
        "Client name can only contain letters, numbers, spaces, hyphens, apostrophes, and periods"
    )]
    fn name_rules(#[case] name: &str, #[case] message: &str) {
        let mut draft = valid_draft();
        draft.name = name.to_owned();
        let error = draft.validate().expect_err("name rejected");
        let fields = error.field_errors().expect("field map");
        assert_eq!(
            fields.get("name").and_then(|m| m.first()).map(String::as_str),
            Some(message)
        );
    }

    #[test]
    fn two_bad_fields_report_two_entries() {
        let mut draft = valid_draft();
        draft.phone = "nope".to_owned();
        draft.notes = "too short".to_owned();

        let error = draft.validate().expect_err("two fields rejected");
        let fields = error.field_errors().expect("field map");
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("notes"));
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = ClientPatch {
            phone: Some("555-000-1111".to_owned()),
            ..ClientPatch::default()
        };
        assert!(patch.validate().is_ok());

        let bad = ClientPatch {
            email: Some("nope".to_owned()),
            ..ClientPatch::default()
        };
        let error = bad.validate().expect_err("email rejected");
        let fields = error.field_errors().expect("field map");
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn empty_patch_is_detectable() {
        assert!(ClientPatch::default().is_empty());
        assert!(
            !ClientPatch {
                company: Some(None),
                ..ClientPatch::default()
            }
            .is_empty()
        );
    }
}
