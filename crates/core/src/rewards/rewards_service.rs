use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::rewards_model::{NewReward, Reward, RewardClaim, RewardUpdate};
use super::rewards_traits::{RewardRepositoryTrait, RewardServiceTrait};
use crate::auth::{ensure_owner, Identity};
use crate::campaigns::CampaignRepositoryTrait;
use crate::donations::DonationRepositoryTrait;
use crate::errors::Result;

/// Service for reward management and claim authorization.
pub struct RewardService {
    repository: Arc<dyn RewardRepositoryTrait>,
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    donation_repository: Arc<dyn DonationRepositoryTrait>,
}

impl RewardService {
    /// Creates a new RewardService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn RewardRepositoryTrait>,
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        donation_repository: Arc<dyn DonationRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            campaign_repository,
            donation_repository,
        }
    }

    fn ensure_campaign_owner(&self, actor: &Identity, campaign_id: i64) -> Result<()> {
        let campaign = self.campaign_repository.get_by_id(campaign_id)?;
        ensure_owner(actor, campaign.owner_id)
    }
}

#[async_trait::async_trait]
impl RewardServiceTrait for RewardService {
    /// Creates a reward on a campaign. Campaign owner only.
    async fn create_reward(&self, actor: &Identity, new_reward: NewReward) -> Result<Reward> {
        new_reward.validate()?;
        self.ensure_campaign_owner(actor, new_reward.campaign_id)?;
        self.repository.insert(new_reward).await
    }

    /// Updates a reward. Campaign owner only.
    async fn update_reward(
        &self,
        actor: &Identity,
        reward_id: i64,
        update: RewardUpdate,
    ) -> Result<Reward> {
        update.validate()?;
        let reward = self.repository.get_by_id(reward_id)?;
        self.ensure_campaign_owner(actor, reward.campaign_id)?;
        self.repository.update(reward_id, update).await
    }

    /// Deletes a reward. Campaign owner only.
    async fn delete_reward(&self, actor: &Identity, reward_id: i64) -> Result<()> {
        let reward = self.repository.get_by_id(reward_id)?;
        self.ensure_campaign_owner(actor, reward.campaign_id)?;
        self.repository.delete(reward_id).await
    }

    fn list_campaign_rewards(&self, campaign_id: i64) -> Result<Vec<Reward>> {
        self.repository.list_by_campaign(campaign_id)
    }

    /// The donor's cumulative completed contribution to the campaign. Always
    /// computed live from the ledger, never cached.
    fn compute_eligible_total(&self, campaign_id: i64, user_id: i64) -> Result<Decimal> {
        self.donation_repository
            .sum_completed_for(campaign_id, user_id)
    }

    /// Claims a reward for the calling donor. The repository authorizes and
    /// applies the claim atomically; eligibility, duplicate and stock
    /// violations surface as typed errors with detail.
    async fn claim_reward(
        &self,
        actor: &Identity,
        reward_id: i64,
        campaign_id: i64,
    ) -> Result<RewardClaim> {
        debug!(
            "user {} claiming reward {} on campaign {}",
            actor.user_id, reward_id, campaign_id
        );
        let claim = self
            .repository
            .claim(actor.user_id, reward_id, campaign_id)
            .await?;
        info!(
            "user {} claimed reward {} on campaign {}",
            actor.user_id, reward_id, campaign_id
        );
        Ok(claim)
    }

    fn list_my_claims(&self, actor: &Identity) -> Result<Vec<RewardClaim>> {
        self.repository.list_claims_by_user(actor.user_id)
    }
}
