//! Translation of port-level errors into domain errors.
//!
//! Services call these at the boundary so adapters never need to know the
//! domain taxonomy and the taxonomy never leaks into adapters.

use crate::domain::error::Error;
use crate::domain::ports::{
    ClientRepositoryError, JobRepositoryError, OrderRepositoryError, PasswordHasherError,
    UserDuplicateField, UserRepositoryError,
};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::storage(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::storage(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { field } => Error::conflict(match field {
            UserDuplicateField::Username => "Username already exists",
            UserDuplicateField::Email => "Email already exists",
        }),
    }
}

pub(crate) fn map_client_repository_error(error: ClientRepositoryError) -> Error {
    match error {
        ClientRepositoryError::Connection { message } => {
            Error::storage(format!("client repository unavailable: {message}"))
        }
        ClientRepositoryError::Query { message } => {
            Error::storage(format!("client repository error: {message}"))
        }
        ClientRepositoryError::ForeignKeyViolation { message } => {
            Error::missing_reference(format!("client owner no longer exists: {message}"))
        }
        ClientRepositoryError::DependentsExist => {
            Error::conflict("Cannot delete client with existing order!")
        }
    }
}

pub(crate) fn map_job_repository_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::storage(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::storage(format!("job repository error: {message}"))
        }
    }
}

pub(crate) fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::storage(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::storage(format!("order repository error: {message}"))
        }
        OrderRepositoryError::ForeignKeyViolation { message } => {
            Error::missing_reference(format!("order references a missing row: {message}"))
        }
    }
}

pub(crate) fn map_password_hasher_error(error: PasswordHasherError) -> Error {
    let PasswordHasherError::Hash { message } = error;
    Error::storage(format!("password hashing failed: {message}"))
}
