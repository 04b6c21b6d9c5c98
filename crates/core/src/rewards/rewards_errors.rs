use rust_decimal::Decimal;
use thiserror::Error;

use crate::errors::ErrorKind;

/// Errors raised by reward management and claim authorization.
#[derive(Debug, Error)]
pub enum RewardError {
    #[error("Reward {0} not found")]
    NotFound(i64),

    #[error("Reward {reward_id} does not belong to campaign {campaign_id}")]
    CampaignMismatch { reward_id: i64, campaign_id: i64 },

    #[error("Reward {reward_id} was already claimed by this user")]
    AlreadyClaimed { reward_id: i64 },

    #[error("Reward {0} is out of stock")]
    OutOfStock(i64),

    #[error("Cumulative contribution {contributed} is below the required {required} (short by {shortfall})")]
    InsufficientContribution {
        required: Decimal,
        contributed: Decimal,
        shortfall: Decimal,
    },
}

impl RewardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // a mismatched campaign is indistinguishable from a missing reward
            RewardError::NotFound(_) | RewardError::CampaignMismatch { .. } => ErrorKind::NotFound,
            RewardError::AlreadyClaimed { .. } | RewardError::OutOfStock(_) => ErrorKind::Conflict,
            RewardError::InsufficientContribution { .. } => ErrorKind::PreconditionFailed,
        }
    }
}
