pub(crate) mod rewards_errors;
pub(crate) mod rewards_model;
pub(crate) mod rewards_service;
pub(crate) mod rewards_traits;

pub use rewards_errors::RewardError;
pub use rewards_model::{evaluate_claim, NewReward, Reward, RewardClaim, RewardUpdate};
pub use rewards_service::RewardService;
pub use rewards_traits::{RewardRepositoryTrait, RewardServiceTrait};
