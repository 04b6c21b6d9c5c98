use async_trait::async_trait;
use rust_decimal::Decimal;

use super::rewards_model::{NewReward, Reward, RewardClaim, RewardUpdate};
use crate::auth::Identity;
use crate::errors::Result;

/// Trait defining the contract for reward repository operations.
///
/// `claim` must gather its facts (existing claim, stock, the donor's
/// completed-donation total), authorize, insert the claim and decrement
/// bounded stock inside one serialized transaction: two racing claims on a
/// stock of one must not both succeed.
#[async_trait]
pub trait RewardRepositoryTrait: Send + Sync {
    fn get_by_id(&self, reward_id: i64) -> Result<Reward>;
    /// Rewards of a campaign, cheapest tier first.
    fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Reward>>;
    fn list_claims_by_user(&self, user_id: i64) -> Result<Vec<RewardClaim>>;

    async fn insert(&self, new_reward: NewReward) -> Result<Reward>;
    async fn update(&self, reward_id: i64, update: RewardUpdate) -> Result<Reward>;
    async fn delete(&self, reward_id: i64) -> Result<()>;

    async fn claim(&self, user_id: i64, reward_id: i64, campaign_id: i64) -> Result<RewardClaim>;
}

/// Trait defining the contract for the reward eligibility service.
#[async_trait]
pub trait RewardServiceTrait: Send + Sync {
    async fn create_reward(&self, actor: &Identity, new_reward: NewReward) -> Result<Reward>;
    async fn update_reward(
        &self,
        actor: &Identity,
        reward_id: i64,
        update: RewardUpdate,
    ) -> Result<Reward>;
    async fn delete_reward(&self, actor: &Identity, reward_id: i64) -> Result<()>;
    fn list_campaign_rewards(&self, campaign_id: i64) -> Result<Vec<Reward>>;

    /// Live sum of the user's completed donations to the campaign.
    fn compute_eligible_total(&self, campaign_id: i64, user_id: i64) -> Result<Decimal>;
    async fn claim_reward(
        &self,
        actor: &Identity,
        reward_id: i64,
        campaign_id: i64,
    ) -> Result<RewardClaim>;
    fn list_my_claims(&self, actor: &Identity) -> Result<Vec<RewardClaim>>;
}
