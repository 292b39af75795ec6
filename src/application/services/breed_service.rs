//! Breed catalogue service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Breed, NewBreed};
use crate::domain::repositories::BreedRepository;
use crate::error::AppError;

/// Service for listing and maintaining breeds.
pub struct BreedService<R: BreedRepository> {
    repository: Arc<R>,
}

impl<R: BreedRepository> BreedService<R> {
    /// Creates a new breed service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of breeds and the total number of breeds.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Breed>, i64), AppError> {
        tokio::try_join!(self.repository.list(offset, limit), self.repository.count())
    }

    /// Creates a breed with a unique name.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `name` if the name is blank or
    /// already exists. A concurrent insert of the same name is caught by the
    /// database constraint and reported the same way.
    pub async fn create(&self, name: &str) -> Result<Breed, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::field("name", "This field may not be blank."));
        }

        if self.repository.find_by_name(name).await?.is_some() {
            return Err(AppError::field(
                "name",
                "breed with this name already exists.",
            ));
        }

        let breed = self
            .repository
            .create(NewBreed {
                name: name.to_string(),
            })
            .await?;

        tracing::info!(breed_id = breed.id, name = %breed.name, "Breed created");

        Ok(breed)
    }

    /// Looks a breed up by numeric ID or exact name.
    pub async fn find(&self, id_or_name: &str) -> Result<Breed, AppError> {
        let found = match id_or_name.parse::<i64>() {
            Ok(id) => self.repository.find_by_id(id).await?,
            Err(_) => self.repository.find_by_name(id_or_name).await?,
        };

        found.ok_or_else(|| AppError::not_found("Breed not found", json!({"breed": id_or_name})))
    }

    /// Deletes a breed, cascading to its kittens and their ratings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the breed does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Breed not found", json!({"id": id})));
        }

        tracing::info!(breed_id = id, "Breed deleted");
        Ok(())
    }
}
