pub mod model;
pub mod repository;

pub use model::{RewardClaimDB, RewardDB};
pub use repository::RewardRepository;
