use thiserror::Error;

use crate::errors::ErrorKind;
use crate::states::{CampaignState, DonationState, WorkflowState};

/// Errors raised by the funds ledger.
#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Donation {0} not found")]
    NotFound(i64),

    #[error("No donation matches gateway reference '{0}'")]
    UnknownReference(String),

    #[error("Campaign is not accepting donations (workflow '{workflow}', fundraising '{fundraising}')")]
    NotAccepting {
        workflow: WorkflowState,
        fundraising: CampaignState,
    },

    #[error("You cannot donate to your own campaign")]
    SelfDonation,

    #[error("Donation is '{0}', only pending donations can be changed")]
    NotPending(DonationState),

    #[error("Only the donor may cancel a donation")]
    NotDonor,
}

impl DonationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DonationError::NotFound(_) | DonationError::UnknownReference(_) => ErrorKind::NotFound,
            DonationError::NotDonor => ErrorKind::Forbidden,
            DonationError::NotAccepting { .. }
            | DonationError::SelfDonation
            | DonationError::NotPending(_) => ErrorKind::Conflict,
        }
    }
}
