pub mod model;
pub mod repository;

pub use model::DonationDB;
pub use repository::DonationRepository;
