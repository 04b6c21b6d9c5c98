pub mod model;
pub mod repository;

pub use model::{CampaignDB, CampaignObservationDB};
pub use repository::CampaignRepository;
