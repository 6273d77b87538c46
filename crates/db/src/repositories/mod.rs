//! Repository layer: one zero-sized struct per table with async CRUD methods.

pub mod game_repo;
pub mod review_repo;
pub mod studio_repo;

pub use game_repo::GameRepo;
pub use review_repo::ReviewRepo;
pub use studio_repo::StudioRepo;
