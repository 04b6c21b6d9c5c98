pub(crate) mod people_model;
pub(crate) mod people_service;
pub(crate) mod people_traits;

pub use people_model::{Person, ProfileUpdate};
pub use people_service::PeopleService;
pub use people_traits::{PeopleServiceTrait, PersonRepositoryTrait};
