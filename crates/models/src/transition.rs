use thiserror::Error;

/// A lifecycle operation was attempted from a status that does not allow it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {action} a {entity} that is {from}")]
pub struct TransitionError {
    pub entity: &'static str,
    pub action: &'static str,
    pub from: String,
}

impl TransitionError {
    pub fn new(entity: &'static str, action: &'static str, from: impl ToString) -> Self {
        Self {
            entity,
            action,
            from: from.to_string(),
        }
    }
}

/// Out-of-range input that never reaches the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Rating must be between 1 and 5, got {0}")]
    Rating(i32),
    #[error("Progress must be between 0 and 100, got {0}")]
    Progress(i32),
    #[error("Duration must be a positive number of minutes, got {0}")]
    Duration(i32),
}
