//! Closed state enumerations for the campaign lifecycle and funds ledger.
//!
//! These are reference data: fixed sets with static display names, persisted
//! as text codes. They are deliberately not runtime-editable rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Editorial approval status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    #[default]
    Draft,
    InReview,
    Observed,
    Rejected,
    Published,
}

impl WorkflowState {
    pub const ALL: [WorkflowState; 5] = [
        WorkflowState::Draft,
        WorkflowState::InReview,
        WorkflowState::Observed,
        WorkflowState::Rejected,
        WorkflowState::Published,
    ];

    /// Stable code stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Draft => "DRAFT",
            WorkflowState::InReview => "IN_REVIEW",
            WorkflowState::Observed => "OBSERVED",
            WorkflowState::Rejected => "REJECTED",
            WorkflowState::Published => "PUBLISHED",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowState::Draft => "Draft",
            WorkflowState::InReview => "In Review",
            WorkflowState::Observed => "Observed",
            WorkflowState::Rejected => "Rejected",
            WorkflowState::Published => "Published",
        }
    }

    /// Whether the owner may still edit campaign content in this state.
    pub fn is_editable(&self) -> bool {
        matches!(self, WorkflowState::Draft | WorkflowState::Observed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WorkflowState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown workflow state '{}'", s)).into()
            })
    }
}

/// Fundraising activity status of a campaign. Meaningful only once the
/// campaign is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignState {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    Finished,
}

impl CampaignState {
    pub const ALL: [CampaignState; 4] = [
        CampaignState::NotStarted,
        CampaignState::InProgress,
        CampaignState::Paused,
        CampaignState::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignState::NotStarted => "NOT_STARTED",
            CampaignState::InProgress => "IN_PROGRESS",
            CampaignState::Paused => "PAUSED",
            CampaignState::Finished => "FINISHED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignState::NotStarted => "Not Started",
            CampaignState::InProgress => "In Progress",
            CampaignState::Paused => "Paused",
            CampaignState::Finished => "Finished",
        }
    }
}

impl fmt::Display for CampaignState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CampaignState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown campaign state '{}'", s)).into()
            })
    }
}

/// Settlement status of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationState {
    Pending,
    Completed,
    Cancelled,
    Refunded,
}

impl DonationState {
    pub const ALL: [DonationState; 4] = [
        DonationState::Pending,
        DonationState::Completed,
        DonationState::Cancelled,
        DonationState::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationState::Pending => "PENDING",
            DonationState::Completed => "COMPLETED",
            DonationState::Cancelled => "CANCELLED",
            DonationState::Refunded => "REFUNDED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DonationState::Pending => "Pending",
            DonationState::Completed => "Completed",
            DonationState::Cancelled => "Cancelled",
            DonationState::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for DonationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DonationState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DonationState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown donation state '{}'", s)).into()
            })
    }
}

/// Administrative action recorded on a campaign observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationAction {
    Observed,
    Rejected,
    Approved,
}

impl ObservationAction {
    pub const ALL: [ObservationAction; 3] = [
        ObservationAction::Observed,
        ObservationAction::Rejected,
        ObservationAction::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationAction::Observed => "OBSERVED",
            ObservationAction::Rejected => "REJECTED",
            ObservationAction::Approved => "APPROVED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ObservationAction::Observed => "Observed",
            ObservationAction::Rejected => "Rejected",
            ObservationAction::Approved => "Approved",
        }
    }
}

impl fmt::Display for ObservationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ObservationAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObservationAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown observation action '{}'", s)).into()
            })
    }
}
