//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Write handlers check permissions before they look at the request body.

pub mod auth;
pub mod breeds;
pub mod health;
pub mod kittens;
pub mod ratings;

pub use auth::{obtain_token_handler, refresh_token_handler};
pub use breeds::{create_breed_handler, list_breeds_handler};
pub use health::health_handler;
pub use kittens::{
    create_kitten_handler, delete_kitten_handler, get_kitten_handler, list_kittens_handler,
    update_kitten_handler,
};
pub use ratings::{list_ratings_handler, rate_kitten_handler};
