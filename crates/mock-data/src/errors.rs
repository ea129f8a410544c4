use planner::{LinkError, ModelError, ValidationError};
use thiserror::Error;

/// Failures while generating the schedule.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("unknown season: {0}")]
    UnknownSeason(String),

    #[error("insufficient course pool: needed {needed} courses, {available} left")]
    PoolExhausted { needed: usize, available: usize },

    #[error("course short id '{0}' contains no course number")]
    NonNumericShortId(String),

    #[error("invalid semester date: {0}")]
    Date(#[from] time::error::ComponentRange),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("generated schedule is inconsistent: {0}")]
    Links(#[from] LinkError),
}

impl From<ModelError> for GenerateError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(e) => Self::Validation(e),
            ModelError::Link(e) => Self::Links(e),
        }
    }
}
