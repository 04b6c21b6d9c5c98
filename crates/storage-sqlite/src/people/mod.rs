pub mod model;
pub mod repository;

pub use model::PersonDB;
pub use repository::PersonRepository;
