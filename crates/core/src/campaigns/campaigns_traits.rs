use async_trait::async_trait;
use chrono::NaiveDate;

use super::campaigns_model::{
    Campaign, CampaignFilter, CampaignObservation, CampaignUpdate, FundraisingAction, NewCampaign,
    SweepOutcome, SweepSummary, WorkflowAction,
};
use crate::auth::Identity;
use crate::errors::Result;
use crate::states::WorkflowState;

/// Trait defining the contract for campaign repository operations.
///
/// Transition methods (`apply_workflow`, `apply_fundraising`,
/// `finish_expired`) must load the row, run the domain transition and persist
/// the result inside a single serialized transaction, so that concurrent
/// callers cannot observe or produce a half-applied state.
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    fn get_by_id(&self, campaign_id: i64) -> Result<Campaign>;
    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Campaign>>;
    /// Published, in-progress campaigns for the public listing.
    fn list_public(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>>;
    /// All campaigns, optionally narrowed to one workflow state (review desk).
    fn list_by_workflow_state(&self, state: Option<WorkflowState>) -> Result<Vec<Campaign>>;
    /// Ids of in-progress campaigns whose expiration date has passed.
    fn list_expired_in_progress(&self, today: NaiveDate) -> Result<Vec<i64>>;
    fn list_observations(&self, campaign_id: i64) -> Result<Vec<CampaignObservation>>;
    fn list_favorites(&self, user_id: i64) -> Result<Vec<Campaign>>;

    async fn insert(&self, owner_id: i64, new_campaign: NewCampaign) -> Result<Campaign>;
    /// Persists an owner edit of the campaign's content fields.
    async fn update_content(&self, campaign_id: i64, update: CampaignUpdate) -> Result<Campaign>;
    async fn delete(&self, campaign_id: i64) -> Result<()>;
    async fn record_view(&self, campaign_id: i64) -> Result<Campaign>;

    /// Atomically applies a workflow transition and records its observation.
    async fn apply_workflow(&self, campaign_id: i64, action: WorkflowAction) -> Result<Campaign>;
    /// Atomically applies a fundraising transition.
    async fn apply_fundraising(
        &self,
        campaign_id: i64,
        action: FundraisingAction,
        today: NaiveDate,
    ) -> Result<Campaign>;
    /// Atomically finishes one expired campaign and refunds its completed
    /// donations when the goal was not reached. Must be a no-op (empty
    /// outcome) when the campaign is no longer in progress or not expired.
    async fn finish_expired(&self, campaign_id: i64, today: NaiveDate) -> Result<SweepOutcome>;

    async fn add_favorite(&self, user_id: i64, campaign_id: i64) -> Result<()>;
    async fn remove_favorite(&self, user_id: i64, campaign_id: i64) -> Result<()>;
}

/// Trait defining the contract for campaign service operations.
#[async_trait]
pub trait CampaignServiceTrait: Send + Sync {
    async fn create_campaign(&self, actor: &Identity, new_campaign: NewCampaign)
        -> Result<Campaign>;
    async fn update_campaign(
        &self,
        actor: &Identity,
        campaign_id: i64,
        update: CampaignUpdate,
    ) -> Result<Campaign>;
    async fn delete_campaign(&self, actor: &Identity, campaign_id: i64) -> Result<()>;
    fn get_campaign(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign>;
    fn list_my_campaigns(&self, actor: &Identity) -> Result<Vec<Campaign>>;
    fn list_public_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>>;
    fn list_campaigns_for_review(
        &self,
        actor: &Identity,
        state: Option<WorkflowState>,
    ) -> Result<Vec<Campaign>>;
    async fn record_view(&self, campaign_id: i64) -> Result<Campaign>;

    async fn submit_for_review(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign>;
    async fn approve(&self, actor: &Identity, campaign_id: i64, rationale: String)
        -> Result<Campaign>;
    async fn observe(&self, actor: &Identity, campaign_id: i64, rationale: String)
        -> Result<Campaign>;
    async fn reject(&self, actor: &Identity, campaign_id: i64, rationale: String)
        -> Result<Campaign>;
    fn list_observations(
        &self,
        actor: &Identity,
        campaign_id: i64,
    ) -> Result<Vec<CampaignObservation>>;

    async fn start_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign>;
    async fn pause_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign>;
    async fn finish_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign>;

    /// Closes out expired in-progress campaigns, refunding unmet goals.
    /// Triggered by the scheduler or an administrator; safe to run
    /// repeatedly.
    async fn sweep_expired(&self) -> Result<SweepSummary>;

    async fn add_favorite(&self, actor: &Identity, campaign_id: i64) -> Result<()>;
    async fn remove_favorite(&self, actor: &Identity, campaign_id: i64) -> Result<()>;
    fn list_favorites(&self, actor: &Identity) -> Result<Vec<Campaign>>;
}
