//! Shared translation of Diesel and pool failures into port error
//! constructors.
//!
//! SQLite reports constraint breaches as database errors whose message
//! names the offending constraint; the helpers here classify them so each
//! repository can pick its own variant.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::pool::{PoolError, RunError};

/// Map a [`RunError`] through per-variant constructors, giving the caller a
/// first look at the raw Diesel error for constraint-specific variants.
pub(super) fn map_run_error<E>(
    error: RunError,
    classify: impl FnOnce(&DieselError) -> Option<E>,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match error {
        RunError::Pool(PoolError::Checkout { message } | PoolError::Build { message }) => {
            connection(message)
        }
        RunError::Query(diesel_error) => {
            if let Some(mapped) = classify(&diesel_error) {
                mapped
            } else {
                query(diesel_error.to_string())
            }
        }
    }
}

fn database_error_message(error: &DieselError) -> Option<(&DatabaseErrorKind, &str)> {
    if let DieselError::DatabaseError(kind, info) = error {
        Some((kind, info.message()))
    } else {
        None
    }
}

/// True when the error is a unique-constraint breach.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    database_error_message(error).is_some_and(|(kind, message)| {
        matches!(kind, DatabaseErrorKind::UniqueViolation)
            || message.contains("UNIQUE constraint failed")
    })
}

/// True when the error is a foreign-key breach.
pub(super) fn is_foreign_key_violation(error: &DieselError) -> bool {
    database_error_message(error).is_some_and(|(kind, message)| {
        matches!(kind, DatabaseErrorKind::ForeignKeyViolation)
            || message.contains("FOREIGN KEY constraint failed")
    })
}

/// The raw database message, for variants that carry it through.
pub(super) fn violation_message(error: &DieselError) -> String {
    database_error_message(error)
        .map(|(_, message)| message.to_owned())
        .unwrap_or_else(|| error.to_string())
}

/// Which unique column a violation names, going by SQLite's
/// `UNIQUE constraint failed: table.column` message shape.
pub(super) fn violated_column(error: &DieselError) -> Option<String> {
    let (_, message) = database_error_message(error)?;
    let (_, constraint) = message.split_once("UNIQUE constraint failed: ")?;
    Some(constraint.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_error(message: &str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(message.to_owned()),
        )
    }

    #[test]
    fn unique_violations_are_detected_by_kind() {
        assert!(is_unique_violation(&unique_error(
            "UNIQUE constraint failed: users.email"
        )));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[test]
    fn violated_column_is_parsed_from_the_sqlite_message() {
        let error = unique_error("UNIQUE constraint failed: users.email");
        assert_eq!(violated_column(&error).as_deref(), Some("users.email"));
    }

    #[test]
    fn non_constraint_errors_fall_through_to_the_query_ctor() {
        let mapped = map_run_error(
            RunError::Query(DieselError::NotFound),
            |_| None::<String>,
            |message| format!("query: {message}"),
            |message| format!("connection: {message}"),
        );
        assert!(mapped.starts_with("query:"));
    }

    #[test]
    fn pool_failures_map_to_the_connection_ctor() {
        let mapped = map_run_error(
            RunError::Pool(PoolError::checkout("timed out")),
            |_| None::<String>,
            |message| format!("query: {message}"),
            |message| format!("connection: {message}"),
        );
        assert_eq!(mapped, "connection: timed out");
    }
}
