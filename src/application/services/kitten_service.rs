//! Kitten record service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Kitten, KittenDetail, KittenFilter, KittenPatch, KittenSummary, NewKitten, User,
};
use crate::domain::repositories::{BreedRepository, KittenRepository, RatingRepository};
use crate::error::{AppError, FieldErrors};

/// Service for kitten listings, details and owner-scoped changes.
///
/// Permission checks happen in the handlers before these methods are
/// called; the service only guarantees that the owner of a new kitten is
/// the caller.
pub struct KittenService<K: KittenRepository, B: BreedRepository, R: RatingRepository> {
    kitten_repository: Arc<K>,
    breed_repository: Arc<B>,
    rating_repository: Arc<R>,
}

impl<K: KittenRepository, B: BreedRepository, R: RatingRepository> KittenService<K, B, R> {
    /// Creates a new kitten service.
    pub fn new(
        kitten_repository: Arc<K>,
        breed_repository: Arc<B>,
        rating_repository: Arc<R>,
    ) -> Self {
        Self {
            kitten_repository,
            breed_repository,
            rating_repository,
        }
    }

    /// Returns one page of kittens matching the filter and the total match count.
    pub async fn list(&self, filter: KittenFilter) -> Result<(Vec<KittenSummary>, i64), AppError> {
        tokio::try_join!(
            self.kitten_repository.list(&filter),
            self.kitten_repository.count(&filter)
        )
    }

    /// Loads the stored kitten row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the kitten does not exist.
    pub async fn find(&self, id: i64) -> Result<Kitten, AppError> {
        self.kitten_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| kitten_not_found(id))
    }

    /// Loads a kitten with its breed, owner, average rating and all ratings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the kitten does not exist.
    pub async fn get_detail(&self, id: i64) -> Result<KittenDetail, AppError> {
        let kitten = self
            .kitten_repository
            .find_summary(id)
            .await?
            .ok_or_else(|| kitten_not_found(id))?;

        let ratings = self.rating_repository.list_for_kitten(id, 0, i64::MAX).await?;

        Ok(KittenDetail { kitten, ratings })
    }

    /// Records a `breed` error when the referenced breed does not exist.
    pub async fn check_breed(&self, breed_id: i64, errors: &mut FieldErrors) -> Result<(), AppError> {
        if self.breed_repository.find_by_id(breed_id).await?.is_none() {
            errors.add(
                "breed",
                format!("Invalid pk \"{breed_id}\" - object does not exist."),
            );
        }
        Ok(())
    }

    /// Creates a kitten owned by `owner`.
    ///
    /// Any owner set on `new_kitten` is replaced by the caller.
    pub async fn create(&self, owner: &User, mut new_kitten: NewKitten) -> Result<Kitten, AppError> {
        new_kitten.owner_id = owner.id;

        let kitten = self.kitten_repository.create(new_kitten).await?;

        tracing::info!(
            kitten_id = kitten.id,
            owner = %owner.username,
            breed_id = kitten.breed_id,
            "Kitten created"
        );

        Ok(kitten)
    }

    /// Applies a partial update.
    ///
    /// An empty patch returns the kitten unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the kitten does not exist.
    pub async fn update(&self, id: i64, patch: KittenPatch) -> Result<Kitten, AppError> {
        if patch.is_empty() {
            return self.find(id).await;
        }

        let kitten = self
            .kitten_repository
            .update(id, patch)
            .await?
            .ok_or_else(|| kitten_not_found(id))?;

        tracing::info!(kitten_id = id, "Kitten updated");

        Ok(kitten)
    }

    /// Deletes a kitten and, through the schema, its ratings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the kitten does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.kitten_repository.delete(id).await? {
            return Err(kitten_not_found(id));
        }

        tracing::info!(kitten_id = id, "Kitten deleted");
        Ok(())
    }
}

pub(crate) fn kitten_not_found(id: i64) -> AppError {
    AppError::not_found("Kitten not found", json!({"id": id}))
}
