use thiserror::Error;

use crate::errors::ErrorKind;
use crate::states::{CampaignState, WorkflowState};

/// Errors raised by campaign operations and lifecycle transitions.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Campaign {0} not found")]
    NotFound(i64),

    #[error("Campaign cannot be edited in state '{0}'")]
    NotEditable(WorkflowState),

    #[error("Only draft campaigns can be deleted, campaign is '{0}'")]
    NotDeletable(WorkflowState),

    #[error("Illegal workflow transition from '{from}' to '{to}'")]
    WorkflowTransition {
        from: WorkflowState,
        to: WorkflowState,
    },

    #[error("Illegal fundraising transition from '{from}' to '{to}'")]
    FundraisingTransition {
        from: CampaignState,
        to: CampaignState,
    },

    #[error("Campaign must be published to manage fundraising, currently '{0}'")]
    NotPublished(WorkflowState),

    #[error("A rationale is required for this action")]
    RationaleRequired,

    #[error("Campaign {0} is already in your favorites")]
    AlreadyFavorite(i64),

    #[error("Campaign {0} is not in your favorites")]
    NotFavorite(i64),
}

impl CampaignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CampaignError::NotFound(_) => ErrorKind::NotFound,
            CampaignError::RationaleRequired => ErrorKind::InvalidArgument,
            CampaignError::NotEditable(_)
            | CampaignError::NotDeletable(_)
            | CampaignError::WorkflowTransition { .. }
            | CampaignError::FundraisingTransition { .. }
            | CampaignError::NotPublished(_)
            | CampaignError::AlreadyFavorite(_)
            | CampaignError::NotFavorite(_) => ErrorKind::Conflict,
        }
    }
}
