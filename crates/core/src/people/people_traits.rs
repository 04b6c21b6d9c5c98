use async_trait::async_trait;

use super::people_model::{Person, ProfileUpdate};
use crate::auth::Identity;
use crate::errors::Result;

/// Trait defining the contract for person repository operations.
#[async_trait]
pub trait PersonRepositoryTrait: Send + Sync {
    fn get_by_id(&self, person_id: i64) -> Result<Person>;
    async fn update_profile(&self, person_id: i64, update: ProfileUpdate) -> Result<Person>;
}

/// Trait defining the contract for the people service.
#[async_trait]
pub trait PeopleServiceTrait: Send + Sync {
    fn get_profile(&self, actor: &Identity) -> Result<Person>;
    async fn update_profile(&self, actor: &Identity, update: ProfileUpdate) -> Result<Person>;
}
