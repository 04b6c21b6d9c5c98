use log::debug;
use std::sync::Arc;

use super::requirements_model::{
    missing_required, CategoryRequirement, NewCategoryRequirement, RequirementResponse,
    ResponseUpsert,
};
use super::requirements_traits::{RequirementRepositoryTrait, RequirementsServiceTrait};
use crate::auth::{ensure_admin, ensure_owner, ensure_owner_or_admin, Identity};
use crate::campaigns::{Campaign, CampaignRepositoryTrait};
use crate::errors::Result;
use crate::requirements::RequirementError;

/// Service for category requirements and campaign responses.
pub struct RequirementsService {
    repository: Arc<dyn RequirementRepositoryTrait>,
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
}

impl RequirementsService {
    /// Creates a new RequirementsService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn RequirementRepositoryTrait>,
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            campaign_repository,
        }
    }
}

#[async_trait::async_trait]
impl RequirementsServiceTrait for RequirementsService {
    /// Defines a requirement on a category. Admin only.
    async fn create_requirement(
        &self,
        actor: &Identity,
        new_requirement: NewCategoryRequirement,
    ) -> Result<CategoryRequirement> {
        ensure_admin(actor)?;
        new_requirement.validate()?;
        self.repository.insert_requirement(new_requirement).await
    }

    /// Removes a requirement from a category. Admin only.
    async fn delete_requirement(&self, actor: &Identity, requirement_id: i64) -> Result<()> {
        ensure_admin(actor)?;
        self.repository.delete_requirement(requirement_id).await
    }

    fn list_category_requirements(&self, category_id: i64) -> Result<Vec<CategoryRequirement>> {
        self.repository.list_by_category(category_id)
    }

    /// Saves the campaign's answer to one of its category's requirements.
    /// Campaign owner only; the requirement must belong to the campaign's
    /// category.
    async fn save_response(
        &self,
        actor: &Identity,
        campaign_id: i64,
        upsert: ResponseUpsert,
    ) -> Result<RequirementResponse> {
        let campaign = self.campaign_repository.get_by_id(campaign_id)?;
        ensure_owner(actor, campaign.owner_id)?;

        let requirement = self.repository.get_requirement(upsert.requirement_id)?;
        if campaign.category_id != Some(requirement.category_id) {
            return Err(RequirementError::WrongCategory {
                requirement_id: requirement.id,
            }
            .into());
        }

        self.repository.upsert_response(campaign_id, upsert).await
    }

    fn list_responses(
        &self,
        actor: &Identity,
        campaign_id: i64,
    ) -> Result<Vec<RequirementResponse>> {
        let campaign = self.campaign_repository.get_by_id(campaign_id)?;
        ensure_owner_or_admin(actor, campaign.owner_id)?;
        self.repository.list_responses(campaign_id)
    }

    fn validate_campaign_requirements(&self, campaign: &Campaign) -> Result<()> {
        let Some(category_id) = campaign.category_id else {
            return Ok(());
        };
        let requirements = self.repository.list_by_category(category_id)?;
        let responses = self.repository.list_responses(campaign.id)?;
        let missing = missing_required(&requirements, &responses);
        if missing.is_empty() {
            Ok(())
        } else {
            debug!(
                "campaign {} missing {} required responses",
                campaign.id,
                missing.len()
            );
            Err(RequirementError::MissingRequired(missing).into())
        }
    }
}
