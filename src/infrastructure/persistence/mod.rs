//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and decoded through `FromRow` row types, so the
//! crate builds without a live database.
//!
//! Every write is a single statement and therefore runs in its own implicit
//! transaction; uniqueness and cascade rules are enforced by the schema in
//! `migrations/`.
//!
//! # Repositories
//!
//! - [`PgBreedRepository`] - Breed catalogue
//! - [`PgKittenRepository`] - Kittens with aggregated ratings
//! - [`PgRatingRepository`] - Ratings
//! - [`PgUserRepository`] - Accounts and credentials

pub mod pg_breed_repository;
pub mod pg_kitten_repository;
pub mod pg_rating_repository;
pub mod pg_user_repository;

pub use pg_breed_repository::PgBreedRepository;
pub use pg_kitten_repository::PgKittenRepository;
pub use pg_rating_repository::PgRatingRepository;
pub use pg_user_repository::PgUserRepository;
