use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaigns::CampaignError;
use crate::errors::{Result, ValidationError};
use crate::states::{CampaignState, ObservationAction, WorkflowState};

/// Domain model for a campaign.
///
/// Two orthogonal state fields govern a campaign: `workflow_state` tracks
/// editorial approval and `campaign_state` tracks fundraising activity.
/// Fundraising is meaningful only once the campaign is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    /// Running total of completed donations. Refunds issued by the expiry
    /// sweep do not decrement it; live aggregates sum completed donations.
    pub current_amount: Decimal,
    pub expiration_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub main_image_url: Option<String>,
    pub rich_text: Option<String>,
    pub view_counting: i32,
    pub favorites_counting: i32,
    pub workflow_state: WorkflowState,
    pub campaign_state: CampaignState,
    pub owner_id: i64,
    pub category_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Campaign {
    /// Whether the campaign is currently able to receive donations.
    pub fn accepts_donations(&self) -> bool {
        self.workflow_state == WorkflowState::Published
            && self.campaign_state == CampaignState::InProgress
    }

    pub fn goal_reached(&self) -> bool {
        self.current_amount >= self.goal_amount
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_some_and(|date| date < today)
    }

    /// Checks the fields the review desk requires before a submission.
    pub fn validate_for_submission(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        if self.goal_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.goal_amount).into());
        }
        Ok(())
    }

    /// Applies a workflow (editorial) transition. Returns the observation to
    /// record alongside the transition, if the action produces one.
    pub fn apply_workflow(
        &mut self,
        action: WorkflowAction,
    ) -> std::result::Result<Option<NewObservation>, CampaignError> {
        match action {
            WorkflowAction::SubmitForReview => {
                if !self.workflow_state.is_editable() {
                    return Err(CampaignError::WorkflowTransition {
                        from: self.workflow_state,
                        to: WorkflowState::InReview,
                    });
                }
                self.workflow_state = WorkflowState::InReview;
                Ok(None)
            }
            WorkflowAction::Approve {
                admin_id,
                rationale,
            } => {
                if !matches!(
                    self.workflow_state,
                    WorkflowState::InReview | WorkflowState::Observed
                ) {
                    return Err(CampaignError::WorkflowTransition {
                        from: self.workflow_state,
                        to: WorkflowState::Published,
                    });
                }
                self.workflow_state = WorkflowState::Published;
                let rationale = if rationale.trim().is_empty() {
                    "Campaign approved".to_string()
                } else {
                    rationale
                };
                Ok(Some(NewObservation {
                    campaign_id: self.id,
                    admin_id,
                    action: ObservationAction::Approved,
                    rationale,
                }))
            }
            WorkflowAction::Observe {
                admin_id,
                rationale,
            } => {
                if self.workflow_state != WorkflowState::InReview {
                    return Err(CampaignError::WorkflowTransition {
                        from: self.workflow_state,
                        to: WorkflowState::Observed,
                    });
                }
                if rationale.trim().is_empty() {
                    return Err(CampaignError::RationaleRequired);
                }
                self.workflow_state = WorkflowState::Observed;
                Ok(Some(NewObservation {
                    campaign_id: self.id,
                    admin_id,
                    action: ObservationAction::Observed,
                    rationale,
                }))
            }
            WorkflowAction::Reject {
                admin_id,
                rationale,
            } => {
                if self.workflow_state != WorkflowState::InReview {
                    return Err(CampaignError::WorkflowTransition {
                        from: self.workflow_state,
                        to: WorkflowState::Rejected,
                    });
                }
                if rationale.trim().is_empty() {
                    return Err(CampaignError::RationaleRequired);
                }
                self.workflow_state = WorkflowState::Rejected;
                Ok(Some(NewObservation {
                    campaign_id: self.id,
                    admin_id,
                    action: ObservationAction::Rejected,
                    rationale,
                }))
            }
        }
    }

    /// Applies a fundraising transition. Legal only on published campaigns.
    pub fn apply_fundraising(
        &mut self,
        action: FundraisingAction,
        today: NaiveDate,
    ) -> std::result::Result<(), CampaignError> {
        if self.workflow_state != WorkflowState::Published {
            return Err(CampaignError::NotPublished(self.workflow_state));
        }
        match action {
            FundraisingAction::Start => {
                if !matches!(
                    self.campaign_state,
                    CampaignState::NotStarted | CampaignState::Paused
                ) {
                    return Err(CampaignError::FundraisingTransition {
                        from: self.campaign_state,
                        to: CampaignState::InProgress,
                    });
                }
                self.campaign_state = CampaignState::InProgress;
                // start_date is set on first entry only
                if self.start_date.is_none() {
                    self.start_date = Some(today);
                }
            }
            FundraisingAction::Pause => {
                if self.campaign_state != CampaignState::InProgress {
                    return Err(CampaignError::FundraisingTransition {
                        from: self.campaign_state,
                        to: CampaignState::Paused,
                    });
                }
                self.campaign_state = CampaignState::Paused;
            }
            FundraisingAction::Finish => {
                if !matches!(
                    self.campaign_state,
                    CampaignState::InProgress | CampaignState::Paused
                ) {
                    return Err(CampaignError::FundraisingTransition {
                        from: self.campaign_state,
                        to: CampaignState::Finished,
                    });
                }
                self.campaign_state = CampaignState::Finished;
                self.end_date = Some(today);
            }
        }
        Ok(())
    }

    /// Closes out an expired in-progress campaign. Returns whether the
    /// campaign transitioned; already-finished campaigns are left untouched,
    /// which is what makes the expiry sweep idempotent.
    pub fn expire(&mut self, today: NaiveDate) -> bool {
        if self.campaign_state != CampaignState::InProgress || !self.is_expired(today) {
            return false;
        }
        self.campaign_state = CampaignState::Finished;
        self.end_date = Some(today);
        true
    }

    /// Merges an owner edit into the campaign. Callers must have checked the
    /// campaign is editable.
    pub fn apply_update(&mut self, update: CampaignUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(goal_amount) = update.goal_amount {
            self.goal_amount = goal_amount.round_dp(2);
        }
        if let Some(expiration_date) = update.expiration_date {
            self.expiration_date = Some(expiration_date);
        }
        if let Some(main_image_url) = update.main_image_url {
            self.main_image_url = Some(main_image_url);
        }
        if let Some(rich_text) = update.rich_text {
            self.rich_text = Some(rich_text);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
    }
}

/// A workflow (editorial approval) transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowAction {
    SubmitForReview,
    Approve { admin_id: i64, rationale: String },
    Observe { admin_id: i64, rationale: String },
    Reject { admin_id: i64, rationale: String },
}

/// A fundraising-state transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundraisingAction {
    Start,
    Pause,
    Finish,
}

/// Input model for creating a new campaign (always starts as a draft).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    pub expiration_date: Option<NaiveDate>,
    pub main_image_url: Option<String>,
    pub rich_text: Option<String>,
    pub category_id: Option<i64>,
}

impl NewCampaign {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        if self.goal_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.goal_amount).into());
        }
        if let Some(expiration) = self.expiration_date {
            if expiration <= today {
                return Err(ValidationError::PastExpiration(expiration).into());
            }
        }
        Ok(())
    }
}

/// Input model for an owner edit of a draft or observed campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_amount: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub main_image_url: Option<String>,
    pub rich_text: Option<String>,
    pub category_id: Option<i64>,
}

impl CampaignUpdate {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title".to_string()).into());
            }
        }
        if let Some(ref description) = self.description {
            if description.trim().is_empty() {
                return Err(ValidationError::MissingField("description".to_string()).into());
            }
        }
        if let Some(goal_amount) = self.goal_amount {
            if goal_amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount(goal_amount).into());
            }
        }
        if let Some(expiration) = self.expiration_date {
            if expiration <= today {
                return Err(ValidationError::PastExpiration(expiration).into());
            }
        }
        Ok(())
    }
}

/// Filter for the public campaign listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFilter {
    pub category_id: Option<i64>,
    /// Substring matched against title and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Append-only audit record of an administrative review action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignObservation {
    pub id: i64,
    pub campaign_id: i64,
    pub admin_id: i64,
    pub action: ObservationAction,
    pub rationale: String,
    pub created_at: NaiveDateTime,
}

/// Observation produced by a workflow transition, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObservation {
    pub campaign_id: i64,
    pub admin_id: i64,
    pub action: ObservationAction,
    pub rationale: String,
}

/// Outcome of sweeping a single expired campaign.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Whether this run transitioned the campaign to finished.
    pub finished: bool,
    /// Donations transitioned to refunded by this run.
    pub refunds: Vec<RefundedDonation>,
}

/// A donation refunded by the expiry sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundedDonation {
    pub donation_id: i64,
    pub donor_id: i64,
    pub amount: Decimal,
}

/// Aggregate result of one expiry sweep run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepSummary {
    pub campaigns_finished: usize,
    pub donations_refunded: usize,
}
