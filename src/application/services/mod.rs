//! Business logic services for the application layer.

pub mod auth_service;
pub mod breed_service;
pub mod kitten_service;
pub mod rating_service;

pub use auth_service::{AuthService, TokenPair};
pub use breed_service::BreedService;
pub use kitten_service::KittenService;
pub use rating_service::RatingService;
