use std::sync::Arc;

use super::people_model::{Person, ProfileUpdate};
use super::people_traits::{PeopleServiceTrait, PersonRepositoryTrait};
use crate::auth::Identity;
use crate::errors::Result;

/// Service for profile reads and edits.
pub struct PeopleService {
    repository: Arc<dyn PersonRepositoryTrait>,
}

impl PeopleService {
    pub fn new(repository: Arc<dyn PersonRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl PeopleServiceTrait for PeopleService {
    fn get_profile(&self, actor: &Identity) -> Result<Person> {
        self.repository.get_by_id(actor.user_id)
    }

    async fn update_profile(&self, actor: &Identity, update: ProfileUpdate) -> Result<Person> {
        update.validate()?;
        self.repository.update_profile(actor.user_id, update).await
    }
}
