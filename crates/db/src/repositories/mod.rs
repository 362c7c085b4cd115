//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The adoption repository
//! additionally owns the transactional lifecycle commands.

pub mod adoption_repo;
pub mod donation_repo;
pub mod lost_found_repo;
pub mod pet_repo;
pub mod rescue_repo;
pub mod session_repo;
pub mod user_repo;

pub use adoption_repo::{AdoptionRepo, CommandError};
pub use donation_repo::DonationRepo;
pub use lost_found_repo::LostFoundRepo;
pub use pet_repo::PetRepo;
pub use rescue_repo::RescueRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
