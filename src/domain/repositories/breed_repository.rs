//! Repository trait for the breed catalogue.

use crate::domain::entities::{Breed, NewBreed};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for breeds.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBreedRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BreedRepository: Send + Sync {
    /// Creates a new breed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is already taken.
    async fn create(&self, new_breed: NewBreed) -> Result<Breed, AppError>;

    /// Finds a breed by its database ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Breed>, AppError>;

    /// Finds a breed by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Breed>, AppError>;

    /// Returns one page of breeds ordered by name.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Breed>, AppError>;

    /// Counts all breeds.
    async fn count(&self) -> Result<i64, AppError>;

    /// Deletes a breed together with its kittens and their ratings.
    ///
    /// Returns `false` when no breed had this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
