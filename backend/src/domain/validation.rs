//! Shared field-validation helpers.
//!
//! Entity modules express their per-field rules through [`Violations`], an
//! accumulator that collects every failing field before a submission is
//! rejected. Validation is pure: nothing here touches persistence.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::{Error, FieldErrors};

/// Accumulates per-field validation messages across one submission.
///
/// Services run every applicable rule before consulting the result, so a
/// payload failing two fields reports both in a single error.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    fields: FieldErrors,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a failing rule for `field`.
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Resolve to `Ok(())` when no rule failed, otherwise a validation error
    /// carrying the whole field map.
    pub(crate) fn into_result(self) -> Result<(), Error> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.fields))
        }
    }
}

static CLIENT_NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

/// Characters permitted in a client name. Length is enforced separately.
pub(crate) fn client_name_regex() -> &'static Regex {
    CLIENT_NAME_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9\s\-'\.]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("client name regex failed to compile: {error}"))
    })
}

/// RFC-like mailbox shape used for client email addresses.
pub(crate) fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// North-American `###-###-####` phone shape.
pub(crate) fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        let pattern = r"^\d{3}-\d{3}-\d{4}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}
