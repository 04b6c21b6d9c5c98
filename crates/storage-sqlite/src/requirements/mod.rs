pub mod model;
pub mod repository;

pub use model::{CategoryRequirementDB, RequirementResponseDB};
pub use repository::RequirementRepository;
