//! PostgreSQL implementation of rating repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewRating, Rating, RatingView};
use crate::domain::repositories::RatingRepository;
use crate::error::AppError;

/// PostgreSQL repository for ratings.
///
/// The `(kitten_id, user_id)` unique constraint guarantees one rating per
/// user and kitten even under concurrent requests.
pub struct PgRatingRepository {
    pool: Arc<PgPool>,
}

impl PgRatingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RatingRow {
    id: i64,
    kitten_id: i64,
    user_id: i64,
    rating: i32,
}

#[derive(FromRow)]
struct RatingViewRow {
    username: String,
    rating: i32,
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn create(&self, new_rating: NewRating) -> Result<Rating, AppError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO ratings (kitten_id, user_id, rating)
            VALUES ($1, $2, $3)
            RETURNING id, kitten_id, user_id, rating
            "#,
        )
        .bind(new_rating.kitten_id)
        .bind(new_rating.user_id)
        .bind(new_rating.rating)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Rating {
            id: row.id,
            kitten_id: row.kitten_id,
            user_id: row.user_id,
            rating: row.rating,
        })
    }

    async fn list_for_kitten(
        &self,
        kitten_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<RatingView>, AppError> {
        let rows = sqlx::query_as::<_, RatingViewRow>(
            r#"
            SELECT u.username, r.rating
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            WHERE r.kitten_id = $1
            ORDER BY r.rating DESC, r.id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(kitten_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RatingView {
                user: r.username,
                rating: r.rating,
            })
            .collect())
    }

    async fn count_for_kitten(&self, kitten_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE kitten_id = $1")
            .bind(kitten_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
