//! Repository trait for kitten records.

use crate::domain::entities::{Kitten, KittenFilter, KittenPatch, KittenSummary, NewKitten};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for kittens.
///
/// Read operations return [`KittenSummary`] rows that already carry the
/// breed, the owner's username and the average rating.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgKittenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KittenRepository: Send + Sync {
    /// Inserts a kitten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `breed` if the breed does not exist.
    async fn create(&self, new_kitten: NewKitten) -> Result<Kitten, AppError>;

    /// Finds the stored kitten row by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Kitten>, AppError>;

    /// Finds a kitten with its breed, owner name and average rating.
    async fn find_summary(&self, id: i64) -> Result<Option<KittenSummary>, AppError>;

    /// Lists kittens matching the filter, youngest first.
    async fn list(&self, filter: &KittenFilter) -> Result<Vec<KittenSummary>, AppError>;

    /// Counts kittens matching the filter, ignoring its paging window.
    async fn count(&self, filter: &KittenFilter) -> Result<i64, AppError>;

    /// Applies a partial update and returns the new row.
    ///
    /// Returns `None` when the kitten does not exist.
    async fn update(&self, id: i64, patch: KittenPatch) -> Result<Option<Kitten>, AppError>;

    /// Deletes a kitten together with its ratings.
    ///
    /// Returns `false` when no kitten had this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
