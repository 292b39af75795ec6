//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, token refresh, request authentication
//! - [`services::breed_service::BreedService`] - Breed catalogue
//! - [`services::kitten_service::KittenService`] - Kitten records and details
//! - [`services::rating_service::RatingService`] - Rating kittens

pub mod services;
