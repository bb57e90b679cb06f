use std::fmt;

use platform_api::ApiError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

/// Key used by a lookup that came back empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Id(i32),
    Email(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {id}"),
            Lookup::Email(email) => write!(f, "email {email}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HrError {
    #[error("employee already exists with email {email}")]
    DuplicateEmail { email: String },
    #[error("employee not found with {0}")]
    NotFound(Lookup),
    #[error("{0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl HrError {
    /// Maps a failed write, treating a unique-index violation as a duplicate email.
    pub(crate) fn from_write(err: DbErr, email: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => HrError::DuplicateEmail {
                email: email.to_string(),
            },
            _ => HrError::Db(err),
        }
    }
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::DuplicateEmail { .. } => ApiError::Conflict(value.to_string()),
            HrError::NotFound(_) => ApiError::NotFound(value.to_string()),
            HrError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            HrError::Db(err) => ApiError::internal(err.into()),
        }
    }
}
