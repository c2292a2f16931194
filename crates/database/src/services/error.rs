use models::transition::{TransitionError, ValueError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("{0} already exists")]
    Duplicate(&'static str),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Turns a unique-index violation raised by an insert into `Duplicate`
    pub(crate) fn from_insert(err: DbErr, what: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(what),
            _ => Self::Database(err),
        }
    }

    /// True for errors caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ServiceError::NotFound("Mentorship").to_string(),
            "Mentorship not found"
        );
        assert_eq!(
            ServiceError::Duplicate("Review").to_string(),
            "Review already exists"
        );
        assert_eq!(
            ServiceError::Value(ValueError::Rating(7)).to_string(),
            "Rating must be between 1 and 5, got 7"
        );

        let db_err = ServiceError::Database(DbErr::Custom("boom".to_string()));
        assert!(db_err.to_string().contains("Database error"));
        assert!(!db_err.is_client_error());
    }

    #[test]
    fn test_non_unique_insert_error_stays_database() {
        let err = ServiceError::from_insert(DbErr::Custom("boom".to_string()), "Review");
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
