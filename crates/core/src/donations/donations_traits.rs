use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::donations_model::{
    CampaignProgress, CompletedDonation, ConfirmOutcome, Donation, DonationReceipt, NewDonation,
    TopDonor,
};
use crate::auth::Identity;
use crate::errors::Result;

/// Trait defining the contract for donation repository operations.
///
/// `record_completed` and `confirm_by_reference` carry the ledger effect:
/// implementations must transition the donation and update the campaign's
/// running total (finishing it when the goal is reached) in one serialized
/// transaction, so concurrent donations can neither lose an increment nor
/// finish the campaign twice.
#[async_trait]
pub trait DonationRepositoryTrait: Send + Sync {
    fn get_by_id(&self, donation_id: i64) -> Result<Donation>;
    fn list_by_donor(&self, donor_id: i64) -> Result<Vec<Donation>>;
    fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Donation>>;
    /// Live aggregate of one user's completed donations to a campaign.
    fn sum_completed_for(&self, campaign_id: i64, user_id: i64) -> Result<Decimal>;
    /// Donors by aggregate completed contribution, highest first.
    fn top_donors(&self, campaign_id: i64, limit: i64) -> Result<Vec<TopDonor>>;

    /// Inserts a pending donation holding a gateway reference. No ledger
    /// effect.
    async fn insert_pending(
        &self,
        donor_id: i64,
        new_donation: NewDonation,
        gateway_reference: String,
    ) -> Result<Donation>;
    /// Inserts a completed donation and applies the ledger effect.
    async fn record_completed(
        &self,
        donor_id: i64,
        new_donation: NewDonation,
        today: NaiveDate,
    ) -> Result<CompletedDonation>;
    /// Settles the pending donation holding this reference and applies the
    /// ledger effect; idempotent success when already completed.
    async fn confirm_by_reference(
        &self,
        gateway_reference: &str,
        today: NaiveDate,
    ) -> Result<ConfirmOutcome>;
    /// Cancels a still-pending donation on behalf of its donor.
    async fn cancel(&self, donation_id: i64, requester_id: i64) -> Result<Donation>;
}

/// Trait defining the contract for the donation (ledger) service.
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    async fn record_donation(
        &self,
        actor: &Identity,
        new_donation: NewDonation,
    ) -> Result<DonationReceipt>;
    async fn confirm_donation(&self, gateway_reference: &str) -> Result<Donation>;
    async fn cancel_donation(&self, actor: &Identity, donation_id: i64) -> Result<()>;

    fn list_my_donations(&self, actor: &Identity) -> Result<Vec<Donation>>;
    fn list_campaign_donations(&self, actor: &Identity, campaign_id: i64)
        -> Result<Vec<Donation>>;
    fn campaign_progress(&self, campaign_id: i64) -> Result<CampaignProgress>;
    fn top_donors(&self, campaign_id: i64, limit: i64) -> Result<Vec<TopDonor>>;
}
