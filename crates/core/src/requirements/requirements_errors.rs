use thiserror::Error;

use crate::errors::ErrorKind;

/// Errors raised by category requirements and their campaign responses.
#[derive(Debug, Error)]
pub enum RequirementError {
    #[error("Requirement {0} not found")]
    NotFound(i64),

    #[error("Requirement {requirement_id} does not apply to this campaign's category")]
    WrongCategory { requirement_id: i64 },

    #[error("Missing responses for required requirements: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

impl RequirementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequirementError::NotFound(_) => ErrorKind::NotFound,
            RequirementError::WrongCategory { .. } => ErrorKind::InvalidArgument,
            RequirementError::MissingRequired(_) => ErrorKind::PreconditionFailed,
        }
    }
}
