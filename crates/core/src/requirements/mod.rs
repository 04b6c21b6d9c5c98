pub(crate) mod requirements_errors;
pub(crate) mod requirements_model;
pub(crate) mod requirements_service;
pub(crate) mod requirements_traits;

pub use requirements_errors::RequirementError;
pub use requirements_model::{
    missing_required, CategoryRequirement, NewCategoryRequirement, RequirementResponse,
    ResponseUpsert,
};
pub use requirements_service::RequirementsService;
pub use requirements_traits::{RequirementRepositoryTrait, RequirementsServiceTrait};
