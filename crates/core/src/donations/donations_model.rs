use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaigns::Campaign;
use crate::donations::DonationError;
use crate::states::{CampaignState, DonationState};

/// Domain model for a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    pub campaign_id: i64,
    pub donor_id: i64,
    pub amount: Decimal,
    pub state: DonationState,
    pub payment_method_id: i64,
    /// Reference at the external gateway, present when settlement was
    /// deferred.
    pub gateway_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Donation {
    /// Marks a pending donation as completed. Returns `true` when this call
    /// performed the transition, `false` when the donation was already
    /// completed (the idempotent confirmation path).
    pub fn settle(&mut self) -> std::result::Result<bool, DonationError> {
        match self.state {
            DonationState::Completed => Ok(false),
            DonationState::Pending => {
                self.state = DonationState::Completed;
                Ok(true)
            }
            other => Err(DonationError::NotPending(other)),
        }
    }

    /// Cancels a still-pending donation on behalf of its donor.
    pub fn cancel(&mut self, requester_id: i64) -> std::result::Result<(), DonationError> {
        if self.donor_id != requester_id {
            return Err(DonationError::NotDonor);
        }
        if self.state != DonationState::Pending {
            return Err(DonationError::NotPending(self.state));
        }
        self.state = DonationState::Cancelled;
        Ok(())
    }

    /// Refunds a completed donation (expiry sweep only). Returns whether the
    /// donation transitioned; refunded donations are left untouched, which
    /// keeps the sweep idempotent.
    pub fn refund(&mut self) -> bool {
        if self.state != DonationState::Completed {
            return false;
        }
        self.state = DonationState::Refunded;
        true
    }
}

/// The effect of applying a completed donation to its campaign's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEffect {
    /// Whether this application pushed the campaign over its goal.
    pub goal_reached: bool,
}

/// Applies a donation amount to a campaign's running total, exactly once per
/// completed donation. Reaching the goal force-finishes the campaign.
///
/// This is the only place `current_amount` is ever increased; callers run it
/// inside the same transaction that transitions the donation to completed.
pub fn apply_ledger_effect(
    campaign: &mut Campaign,
    amount: Decimal,
    today: NaiveDate,
) -> std::result::Result<LedgerEffect, DonationError> {
    if !campaign.accepts_donations() {
        return Err(DonationError::NotAccepting {
            workflow: campaign.workflow_state,
            fundraising: campaign.campaign_state,
        });
    }
    campaign.current_amount = (campaign.current_amount + amount).round_dp(2);
    let goal_reached = campaign.goal_reached();
    if goal_reached {
        campaign.campaign_state = CampaignState::Finished;
        campaign.end_date = Some(today);
    }
    Ok(LedgerEffect { goal_reached })
}

/// Input model for recording a donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    pub campaign_id: i64,
    pub amount: Decimal,
    pub payment_method_id: i64,
}

/// What the caller gets back from recording a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub donation: Donation,
    /// Where the donor completes payment when settlement was deferred;
    /// absent for instantly settled donations.
    pub payment_url: Option<String>,
}

/// Result of atomically recording a completed donation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDonation {
    pub donation: Donation,
    pub campaign: Campaign,
    pub goal_reached: bool,
}

/// Result of confirming a donation by gateway reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOutcome {
    pub donation: Donation,
    pub campaign: Campaign,
    /// Whether this confirmation applied the ledger effect (false when the
    /// donation was already completed).
    pub applied: bool,
    pub goal_reached: bool,
}

/// Funding progress of a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    pub campaign_id: i64,
    pub current_amount: Decimal,
    pub goal_amount: Decimal,
    pub progress_percentage: Decimal,
}

impl CampaignProgress {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        let progress_percentage = if campaign.goal_amount > Decimal::ZERO {
            (campaign.current_amount / campaign.goal_amount * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };
        Self {
            campaign_id: campaign.id,
            current_amount: campaign.current_amount,
            goal_amount: campaign.goal_amount,
            progress_percentage,
        }
    }
}

/// A donor's aggregate completed contribution to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDonor {
    pub donor_id: i64,
    pub total: Decimal,
}
