//! PostgreSQL implementation of breed repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Breed, NewBreed};
use crate::domain::repositories::BreedRepository;
use crate::error::AppError;

/// PostgreSQL repository for breeds.
///
/// Deleting a breed relies on `ON DELETE CASCADE` to remove its kittens and
/// their ratings in the same statement.
pub struct PgBreedRepository {
    pool: Arc<PgPool>,
}

impl PgBreedRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BreedRow {
    id: i64,
    name: String,
}

impl From<BreedRow> for Breed {
    fn from(row: BreedRow) -> Self {
        Breed::new(row.id, row.name)
    }
}

#[async_trait]
impl BreedRepository for PgBreedRepository {
    async fn create(&self, new_breed: NewBreed) -> Result<Breed, AppError> {
        let row = sqlx::query_as::<_, BreedRow>(
            r#"
            INSERT INTO breeds (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_breed.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Breed>, AppError> {
        let row = sqlx::query_as::<_, BreedRow>("SELECT id, name FROM breeds WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Breed::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Breed>, AppError> {
        let row = sqlx::query_as::<_, BreedRow>("SELECT id, name FROM breeds WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Breed::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Breed>, AppError> {
        let rows = sqlx::query_as::<_, BreedRow>(
            r#"
            SELECT id, name
            FROM breeds
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Breed::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM breeds")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
