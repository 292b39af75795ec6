//! Repository trait for kitten ratings.

use crate::domain::entities::{NewRating, Rating, RatingView};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for ratings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRatingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Stores a rating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user already rated this kitten.
    /// Returns [`AppError::NotFound`] if the kitten no longer exists.
    async fn create(&self, new_rating: NewRating) -> Result<Rating, AppError>;

    /// Returns a page of a kitten's ratings, highest first.
    async fn list_for_kitten(
        &self,
        kitten_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<RatingView>, AppError>;

    /// Counts a kitten's ratings.
    async fn count_for_kitten(&self, kitten_id: i64) -> Result<i64, AppError>;
}
