pub(crate) mod donations_errors;
pub(crate) mod donations_model;
pub(crate) mod donations_service;
pub(crate) mod donations_traits;

pub use donations_errors::DonationError;
pub use donations_model::{
    apply_ledger_effect, CampaignProgress, CompletedDonation, ConfirmOutcome, Donation,
    DonationReceipt, LedgerEffect, NewDonation, TopDonor,
};
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
