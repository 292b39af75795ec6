//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`BreedRepository`] - Breed catalogue
//! - [`KittenRepository`] - Kitten CRUD and listings with average rating
//! - [`RatingRepository`] - Ratings per kitten
//! - [`UserRepository`] - Accounts and credentials
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod breed_repository;
pub mod kitten_repository;
pub mod rating_repository;
pub mod user_repository;

pub use breed_repository::BreedRepository;
pub use kitten_repository::KittenRepository;
pub use rating_repository::RatingRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use breed_repository::MockBreedRepository;
#[cfg(test)]
pub use kitten_repository::MockKittenRepository;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
