use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use super::donations_model::{
    CampaignProgress, Donation, DonationReceipt, NewDonation, TopDonor,
};
use super::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::auth::{ensure_owner_or_admin, Identity};
use crate::campaigns::CampaignRepositoryTrait;
use crate::donations::DonationError;
use crate::errors::{Result, ValidationError};
use crate::gateway::PaymentGatewayTrait;
use crate::notifications::{NotificationEvent, NotifierTrait};

/// The funds ledger: the sole authority for donation state transitions tied
/// to money movement and for a campaign's running total.
pub struct DonationService {
    repository: Arc<dyn DonationRepositoryTrait>,
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    gateway: Arc<dyn PaymentGatewayTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl DonationService {
    /// Creates a new DonationService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn DonationRepositoryTrait>,
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        gateway: Arc<dyn PaymentGatewayTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        Self {
            repository,
            campaign_repository,
            gateway,
            notifier,
        }
    }

    /// Settles a donation right away: inserts it completed and applies the
    /// ledger effect in one transaction, then emits notifications.
    async fn settle_instantly(
        &self,
        donor_id: i64,
        new_donation: NewDonation,
    ) -> Result<DonationReceipt> {
        let today = Utc::now().date_naive();
        let completed = self
            .repository
            .record_completed(donor_id, new_donation, today)
            .await?;

        self.notifier.notify(
            NotificationEvent::DonationReceived {
                campaign_id: completed.campaign.id,
                amount: completed.donation.amount,
            },
            completed.campaign.owner_id,
        );
        if completed.goal_reached {
            info!(
                "campaign {} reached its goal at {}",
                completed.campaign.id, completed.campaign.current_amount
            );
            self.notifier.notify(
                NotificationEvent::GoalReached {
                    campaign_id: completed.campaign.id,
                    total: completed.campaign.current_amount,
                },
                completed.campaign.owner_id,
            );
        }

        Ok(DonationReceipt {
            donation: completed.donation,
            payment_url: None,
        })
    }
}

#[async_trait::async_trait]
impl DonationServiceTrait for DonationService {
    /// Records a donation against a published, in-progress campaign.
    ///
    /// The gateway decides settlement: a pending reference defers the ledger
    /// effect until confirmation; no reference settles instantly. A gateway
    /// failure also settles instantly rather than losing the payment intent.
    async fn record_donation(
        &self,
        actor: &Identity,
        new_donation: NewDonation,
    ) -> Result<DonationReceipt> {
        let amount = new_donation.amount.round_dp(2);
        if amount <= rust_decimal::Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(new_donation.amount).into());
        }
        let new_donation = NewDonation {
            amount,
            ..new_donation
        };

        let campaign = self.campaign_repository.get_by_id(new_donation.campaign_id)?;
        if campaign.owner_id == actor.user_id {
            return Err(DonationError::SelfDonation.into());
        }
        // Fail fast; the ledger re-checks atomically when applying.
        if !campaign.accepts_donations() {
            return Err(DonationError::NotAccepting {
                workflow: campaign.workflow_state,
                fundraising: campaign.campaign_state,
            }
            .into());
        }

        let pending = match self.gateway.initiate_payment(amount).await {
            Ok(pending) => pending,
            Err(e) => {
                // A flaky gateway must not lose the donation.
                warn!(
                    "payment gateway failed for campaign {}, settling instantly: {}",
                    new_donation.campaign_id, e
                );
                None
            }
        };

        match pending {
            Some(payment) => {
                debug!(
                    "donation to campaign {} pending at gateway ({})",
                    new_donation.campaign_id, payment.reference
                );
                let donation = self
                    .repository
                    .insert_pending(actor.user_id, new_donation, payment.reference)
                    .await?;
                Ok(DonationReceipt {
                    donation,
                    payment_url: Some(payment.payment_url),
                })
            }
            None => self.settle_instantly(actor.user_id, new_donation).await,
        }
    }

    /// Gateway callback: settles the pending donation holding this
    /// reference. Calling it again for an already-settled donation is a
    /// no-op success; the ledger effect is applied exactly once.
    async fn confirm_donation(&self, gateway_reference: &str) -> Result<Donation> {
        let today = Utc::now().date_naive();
        let outcome = self
            .repository
            .confirm_by_reference(gateway_reference, today)
            .await?;

        if outcome.applied {
            info!(
                "donation {} confirmed for campaign {}",
                outcome.donation.id, outcome.campaign.id
            );
            self.notifier.notify(
                NotificationEvent::DonationReceived {
                    campaign_id: outcome.campaign.id,
                    amount: outcome.donation.amount,
                },
                outcome.campaign.owner_id,
            );
            if outcome.goal_reached {
                self.notifier.notify(
                    NotificationEvent::GoalReached {
                        campaign_id: outcome.campaign.id,
                        total: outcome.campaign.current_amount,
                    },
                    outcome.campaign.owner_id,
                );
            }
        }

        Ok(outcome.donation)
    }

    /// Cancels a still-pending donation. Only the donor may cancel; there is
    /// no ledger effect to undo.
    async fn cancel_donation(&self, actor: &Identity, donation_id: i64) -> Result<()> {
        self.repository.cancel(donation_id, actor.user_id).await?;
        Ok(())
    }

    fn list_my_donations(&self, actor: &Identity) -> Result<Vec<Donation>> {
        self.repository.list_by_donor(actor.user_id)
    }

    /// Donations of a campaign; visible to the owner and administrators.
    fn list_campaign_donations(
        &self,
        actor: &Identity,
        campaign_id: i64,
    ) -> Result<Vec<Donation>> {
        let campaign = self.campaign_repository.get_by_id(campaign_id)?;
        ensure_owner_or_admin(actor, campaign.owner_id)?;
        self.repository.list_by_campaign(campaign_id)
    }

    fn campaign_progress(&self, campaign_id: i64) -> Result<CampaignProgress> {
        let campaign = self.campaign_repository.get_by_id(campaign_id)?;
        Ok(CampaignProgress::from_campaign(&campaign))
    }

    fn top_donors(&self, campaign_id: i64, limit: i64) -> Result<Vec<TopDonor>> {
        // Existence check keeps NotFound ahead of an empty list.
        self.campaign_repository.get_by_id(campaign_id)?;
        self.repository.top_donors(campaign_id, limit)
    }
}
