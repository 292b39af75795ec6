//! Core domain entities representing the catalogue data model.
//!
//! # Entity Types
//!
//! - [`Breed`] - A cat breed, referenced by kittens
//! - [`Kitten`] - A catalogued kitten owned by a user
//! - [`Rating`] - A user's 1-5 score for a kitten
//! - [`User`] - An authenticated identity
//!
//! # Design Pattern
//!
//! Separate structs are used for creation and partial updates:
//! - `NewBreed`, `NewKitten`, `NewRating`, `NewUser` - For creating new records
//! - `KittenPatch` - For partial updates
//!
//! Read models joined across tables (`KittenSummary`, `KittenDetail`,
//! `RatingView`) carry display values such as usernames and the computed
//! average rating.

pub mod breed;
pub mod kitten;
pub mod rating;
pub mod user;

pub use breed::{Breed, NewBreed};
pub use kitten::{
    KITTEN_MAX_AGE, KITTEN_MIN_AGE, Kitten, KittenDetail, KittenFilter, KittenPatch,
    KittenSummary, NewKitten,
};
pub use rating::{NewRating, RATING_MAX, RATING_MIN, Rating, RatingView};
pub use user::{NewUser, User, UserCredentials};
