pub(crate) mod campaigns_errors;
pub(crate) mod campaigns_model;
pub(crate) mod campaigns_service;
pub(crate) mod campaigns_traits;

pub use campaigns_errors::CampaignError;
pub use campaigns_model::{
    Campaign, CampaignFilter, CampaignObservation, CampaignUpdate, FundraisingAction, NewCampaign,
    NewObservation, RefundedDonation, SweepOutcome, SweepSummary, WorkflowAction,
};
pub use campaigns_service::CampaignService;
pub use campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
