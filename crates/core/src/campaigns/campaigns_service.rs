use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use super::campaigns_model::{
    Campaign, CampaignFilter, CampaignObservation, CampaignUpdate, FundraisingAction, NewCampaign,
    SweepSummary, WorkflowAction,
};
use super::campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
use crate::auth::{ensure_admin, ensure_owner, ensure_owner_or_admin, Identity};
use crate::campaigns::CampaignError;
use crate::errors::Result;
use crate::notifications::{NotificationEvent, NotifierTrait};
use crate::requirements::RequirementsServiceTrait;
use crate::states::WorkflowState;

/// Service for campaign CRUD and the campaign lifecycle.
pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryTrait>,
    requirements: Arc<dyn RequirementsServiceTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl CampaignService {
    /// Creates a new CampaignService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn CampaignRepositoryTrait>,
        requirements: Arc<dyn RequirementsServiceTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        Self {
            repository,
            requirements,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl CampaignServiceTrait for CampaignService {
    /// Creates a new campaign in draft state.
    async fn create_campaign(
        &self,
        actor: &Identity,
        new_campaign: NewCampaign,
    ) -> Result<Campaign> {
        let today = Utc::now().date_naive();
        new_campaign.validate(today)?;
        debug!("creating campaign '{}' for user {}", new_campaign.title, actor.user_id);
        self.repository.insert(actor.user_id, new_campaign).await
    }

    /// Updates a campaign's content. Owner only, and only while the campaign
    /// is still editable (draft or observed).
    async fn update_campaign(
        &self,
        actor: &Identity,
        campaign_id: i64,
        update: CampaignUpdate,
    ) -> Result<Campaign> {
        let today = Utc::now().date_naive();
        update.validate(today)?;

        let campaign = self.repository.get_by_id(campaign_id)?;
        ensure_owner(actor, campaign.owner_id)?;
        if !campaign.workflow_state.is_editable() {
            return Err(CampaignError::NotEditable(campaign.workflow_state).into());
        }

        self.repository.update_content(campaign_id, update).await
    }

    /// Deletes a campaign. Owner or admin, draft campaigns only.
    async fn delete_campaign(&self, actor: &Identity, campaign_id: i64) -> Result<()> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        ensure_owner_or_admin(actor, campaign.owner_id)?;
        if campaign.workflow_state != WorkflowState::Draft {
            return Err(CampaignError::NotDeletable(campaign.workflow_state).into());
        }
        self.repository.delete(campaign_id).await
    }

    /// Retrieves a campaign. Unpublished campaigns are visible to their
    /// owner and administrators only.
    fn get_campaign(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        if campaign.workflow_state != WorkflowState::Published {
            ensure_owner_or_admin(actor, campaign.owner_id)?;
        }
        Ok(campaign)
    }

    fn list_my_campaigns(&self, actor: &Identity) -> Result<Vec<Campaign>> {
        self.repository.list_by_owner(actor.user_id)
    }

    fn list_public_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        self.repository.list_public(filter)
    }

    /// Lists campaigns for the review desk, optionally by workflow state.
    fn list_campaigns_for_review(
        &self,
        actor: &Identity,
        state: Option<WorkflowState>,
    ) -> Result<Vec<Campaign>> {
        ensure_admin(actor)?;
        self.repository.list_by_workflow_state(state)
    }

    async fn record_view(&self, campaign_id: i64) -> Result<Campaign> {
        self.repository.record_view(campaign_id).await
    }

    /// Sends a campaign to review. Owner only, from draft or observed, with
    /// the required fields and every required category requirement answered.
    async fn submit_for_review(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        ensure_owner(actor, campaign.owner_id)?;
        campaign.validate_for_submission()?;
        self.requirements.validate_campaign_requirements(&campaign)?;

        let updated = self
            .repository
            .apply_workflow(campaign_id, WorkflowAction::SubmitForReview)
            .await?;
        info!("campaign {} submitted for review", campaign_id);
        Ok(updated)
    }

    /// Publishes a campaign. Admin only, from in-review or observed.
    async fn approve(
        &self,
        actor: &Identity,
        campaign_id: i64,
        rationale: String,
    ) -> Result<Campaign> {
        ensure_admin(actor)?;
        let updated = self
            .repository
            .apply_workflow(
                campaign_id,
                WorkflowAction::Approve {
                    admin_id: actor.user_id,
                    rationale,
                },
            )
            .await?;
        info!("campaign {} approved by admin {}", campaign_id, actor.user_id);
        self.notifier.notify(
            NotificationEvent::CampaignApproved { campaign_id },
            updated.owner_id,
        );
        Ok(updated)
    }

    /// Sends a campaign back to its owner with corrections. Admin only.
    async fn observe(
        &self,
        actor: &Identity,
        campaign_id: i64,
        rationale: String,
    ) -> Result<Campaign> {
        ensure_admin(actor)?;
        let updated = self
            .repository
            .apply_workflow(
                campaign_id,
                WorkflowAction::Observe {
                    admin_id: actor.user_id,
                    rationale: rationale.clone(),
                },
            )
            .await?;
        self.notifier.notify(
            NotificationEvent::CampaignObserved {
                campaign_id,
                rationale,
            },
            updated.owner_id,
        );
        Ok(updated)
    }

    /// Rejects a campaign. Admin only.
    async fn reject(
        &self,
        actor: &Identity,
        campaign_id: i64,
        rationale: String,
    ) -> Result<Campaign> {
        ensure_admin(actor)?;
        let updated = self
            .repository
            .apply_workflow(
                campaign_id,
                WorkflowAction::Reject {
                    admin_id: actor.user_id,
                    rationale: rationale.clone(),
                },
            )
            .await?;
        self.notifier.notify(
            NotificationEvent::CampaignRejected {
                campaign_id,
                rationale,
            },
            updated.owner_id,
        );
        Ok(updated)
    }

    /// Review history of a campaign, newest first. Owner or admin.
    fn list_observations(
        &self,
        actor: &Identity,
        campaign_id: i64,
    ) -> Result<Vec<CampaignObservation>> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        ensure_owner_or_admin(actor, campaign.owner_id)?;
        self.repository.list_observations(campaign_id)
    }

    async fn start_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign> {
        self.apply_fundraising(actor, campaign_id, FundraisingAction::Start)
            .await
    }

    async fn pause_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign> {
        self.apply_fundraising(actor, campaign_id, FundraisingAction::Pause)
            .await
    }

    async fn finish_fundraising(&self, actor: &Identity, campaign_id: i64) -> Result<Campaign> {
        self.apply_fundraising(actor, campaign_id, FundraisingAction::Finish)
            .await
    }

    /// Closes out expired in-progress campaigns. Campaigns that missed their
    /// goal have every completed donation refunded; each campaign is handled
    /// in its own transaction, so re-running after a partial failure only
    /// touches what the previous run did not.
    async fn sweep_expired(&self) -> Result<SweepSummary> {
        let today = Utc::now().date_naive();
        let expired = self.repository.list_expired_in_progress(today)?;
        if expired.is_empty() {
            debug!("expiry sweep: nothing to do");
            return Ok(SweepSummary::default());
        }

        let mut summary = SweepSummary::default();
        for campaign_id in expired {
            match self.repository.finish_expired(campaign_id, today).await {
                Ok(outcome) => {
                    if outcome.finished {
                        summary.campaigns_finished += 1;
                    }
                    summary.donations_refunded += outcome.refunds.len();
                    for refund in outcome.refunds {
                        self.notifier.notify(
                            NotificationEvent::DonationRefunded {
                                campaign_id,
                                donation_id: refund.donation_id,
                                amount: refund.amount,
                            },
                            refund.donor_id,
                        );
                    }
                }
                Err(e) => {
                    // Keep sweeping; the failed campaign is picked up again
                    // on the next run.
                    warn!("expiry sweep failed for campaign {}: {}", campaign_id, e);
                }
            }
        }

        info!(
            "expiry sweep finished {} campaigns, refunded {} donations",
            summary.campaigns_finished, summary.donations_refunded
        );
        Ok(summary)
    }

    async fn add_favorite(&self, actor: &Identity, campaign_id: i64) -> Result<()> {
        // Existence check, surfaces NotFound before the unique constraint.
        self.repository.get_by_id(campaign_id)?;
        self.repository.add_favorite(actor.user_id, campaign_id).await
    }

    async fn remove_favorite(&self, actor: &Identity, campaign_id: i64) -> Result<()> {
        self.repository
            .remove_favorite(actor.user_id, campaign_id)
            .await
    }

    fn list_favorites(&self, actor: &Identity) -> Result<Vec<Campaign>> {
        self.repository.list_favorites(actor.user_id)
    }
}

impl CampaignService {
    async fn apply_fundraising(
        &self,
        actor: &Identity,
        campaign_id: i64,
        action: FundraisingAction,
    ) -> Result<Campaign> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        ensure_owner(actor, campaign.owner_id)?;
        let today = Utc::now().date_naive();
        self.repository
            .apply_fundraising(campaign_id, action, today)
            .await
    }
}
