use async_trait::async_trait;

use super::requirements_model::{
    CategoryRequirement, NewCategoryRequirement, RequirementResponse, ResponseUpsert,
};
use crate::auth::Identity;
use crate::campaigns::Campaign;
use crate::errors::Result;

/// Trait defining the contract for requirement repository operations.
#[async_trait]
pub trait RequirementRepositoryTrait: Send + Sync {
    fn get_requirement(&self, requirement_id: i64) -> Result<CategoryRequirement>;
    /// Requirements of a category in display order.
    fn list_by_category(&self, category_id: i64) -> Result<Vec<CategoryRequirement>>;
    fn list_responses(&self, campaign_id: i64) -> Result<Vec<RequirementResponse>>;

    async fn insert_requirement(
        &self,
        new_requirement: NewCategoryRequirement,
    ) -> Result<CategoryRequirement>;
    async fn delete_requirement(&self, requirement_id: i64) -> Result<()>;
    /// Creates or replaces the campaign's response to a requirement.
    async fn upsert_response(
        &self,
        campaign_id: i64,
        upsert: ResponseUpsert,
    ) -> Result<RequirementResponse>;
}

/// Trait defining the contract for the requirements service.
#[async_trait]
pub trait RequirementsServiceTrait: Send + Sync {
    async fn create_requirement(
        &self,
        actor: &Identity,
        new_requirement: NewCategoryRequirement,
    ) -> Result<CategoryRequirement>;
    async fn delete_requirement(&self, actor: &Identity, requirement_id: i64) -> Result<()>;
    fn list_category_requirements(&self, category_id: i64) -> Result<Vec<CategoryRequirement>>;

    async fn save_response(
        &self,
        actor: &Identity,
        campaign_id: i64,
        upsert: ResponseUpsert,
    ) -> Result<RequirementResponse>;
    fn list_responses(&self, actor: &Identity, campaign_id: i64)
        -> Result<Vec<RequirementResponse>>;

    /// The Draft -> InReview guard: every required requirement of the
    /// campaign's category must have a present response. Uncategorized
    /// campaigns pass trivially.
    fn validate_campaign_requirements(&self, campaign: &Campaign) -> Result<()>;
}
