use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::rewards::RewardError;

/// Domain model for a campaign reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: i64,
    pub campaign_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Minimum cumulative completed contribution required to claim.
    pub amount: Decimal,
    /// Remaining claims; `None` means unlimited.
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A donor's exercised claim on a reward. At most one per (user, reward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardClaim {
    pub id: i64,
    pub user_id: i64,
    pub reward_id: i64,
    pub campaign_id: i64,
    pub claimed_at: NaiveDateTime,
}

/// Authorizes a claim against the facts gathered in the claim transaction.
///
/// Order matters for the error surface: a mismatched campaign reads as "no
/// such reward", a duplicate claim beats an out-of-stock report, and
/// eligibility is checked last so the shortfall is only computed for
/// otherwise-valid claims.
pub fn evaluate_claim(
    reward: &Reward,
    campaign_id: i64,
    already_claimed: bool,
    eligible_total: Decimal,
) -> std::result::Result<(), RewardError> {
    if reward.campaign_id != campaign_id {
        return Err(RewardError::CampaignMismatch {
            reward_id: reward.id,
            campaign_id,
        });
    }
    if already_claimed {
        return Err(RewardError::AlreadyClaimed {
            reward_id: reward.id,
        });
    }
    if let Some(stock) = reward.stock {
        if stock <= 0 {
            return Err(RewardError::OutOfStock(reward.id));
        }
    }
    if eligible_total < reward.amount {
        return Err(RewardError::InsufficientContribution {
            required: reward.amount,
            contributed: eligible_total,
            shortfall: (reward.amount - eligible_total).round_dp(2),
        });
    }
    Ok(())
}

/// Input model for creating a reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReward {
    pub campaign_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

impl NewReward {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount).into());
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(
                    ValidationError::InvalidInput("stock cannot be negative".to_string()).into(),
                );
            }
        }
        Ok(())
    }
}

/// Input model for updating a reward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

impl RewardUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title".to_string()).into());
            }
        }
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount(amount).into());
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(
                    ValidationError::InvalidInput("stock cannot be negative".to_string()).into(),
                );
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, reward: &mut Reward) {
        if let Some(ref title) = self.title {
            reward.title = title.clone();
        }
        if let Some(ref description) = self.description {
            reward.description = Some(description.clone());
        }
        if let Some(amount) = self.amount {
            reward.amount = amount.round_dp(2);
        }
        if let Some(stock) = self.stock {
            reward.stock = Some(stock);
        }
        if let Some(ref image_url) = self.image_url {
            reward.image_url = Some(image_url.clone());
        }
    }
}
