//! PostgreSQL implementation of kitten repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{
    Breed, Kitten, KittenFilter, KittenPatch, KittenSummary, NewKitten,
};
use crate::domain::repositories::KittenRepository;
use crate::error::AppError;

/// Columns and joins shared by every summary query.
///
/// `AVG` over an integer column yields `NUMERIC`; it is cast to `FLOAT8` so it
/// decodes into `f64`. Kittens without ratings get `NULL`.
const SUMMARY_SELECT: &str = r#"
    SELECT k.id, k.breed_id, b.name AS breed_name, k.color, k.age, k.description,
           k.owner_id, u.username AS owner,
           AVG(r.rating)::FLOAT8 AS average_rating
    FROM kittens k
    JOIN breeds b ON b.id = k.breed_id
    JOIN users u ON u.id = k.owner_id
    LEFT JOIN ratings r ON r.kitten_id = k.id
"#;

const FILTER_CLAUSE: &str = r#"
    WHERE ($1::BIGINT IS NULL OR k.breed_id = $1)
      AND ($2::TEXT IS NULL OR k.color = $2)
      AND ($3::INTEGER IS NULL OR k.age = $3)
"#;

const GROUP_CLAUSE: &str = " GROUP BY k.id, b.name, u.username ";

/// PostgreSQL repository for kittens.
pub struct PgKittenRepository {
    pool: Arc<PgPool>,
}

impl PgKittenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct KittenRow {
    id: i64,
    breed_id: i64,
    color: String,
    age: i32,
    description: String,
    owner_id: i64,
}

impl From<KittenRow> for Kitten {
    fn from(row: KittenRow) -> Self {
        Kitten {
            id: row.id,
            breed_id: row.breed_id,
            color: row.color,
            age: row.age,
            description: row.description,
            owner_id: row.owner_id,
        }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: i64,
    breed_id: i64,
    breed_name: String,
    color: String,
    age: i32,
    description: String,
    owner_id: i64,
    owner: String,
    average_rating: Option<f64>,
}

impl From<SummaryRow> for KittenSummary {
    fn from(row: SummaryRow) -> Self {
        KittenSummary {
            id: row.id,
            breed: Breed::new(row.breed_id, row.breed_name),
            color: row.color,
            age: row.age,
            description: row.description,
            owner_id: row.owner_id,
            owner: row.owner,
            average_rating: row.average_rating,
        }
    }
}

#[async_trait]
impl KittenRepository for PgKittenRepository {
    async fn create(&self, new_kitten: NewKitten) -> Result<Kitten, AppError> {
        let row = sqlx::query_as::<_, KittenRow>(
            r#"
            INSERT INTO kittens (breed_id, color, age, description, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, breed_id, color, age, description, owner_id
            "#,
        )
        .bind(new_kitten.breed_id)
        .bind(&new_kitten.color)
        .bind(new_kitten.age)
        .bind(&new_kitten.description)
        .bind(new_kitten.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Kitten>, AppError> {
        let row = sqlx::query_as::<_, KittenRow>(
            r#"
            SELECT id, breed_id, color, age, description, owner_id
            FROM kittens
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Kitten::from))
    }

    async fn find_summary(&self, id: i64) -> Result<Option<KittenSummary>, AppError> {
        let sql = format!("{SUMMARY_SELECT} WHERE k.id = $1 {GROUP_CLAUSE}");

        let row = sqlx::query_as::<_, SummaryRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(KittenSummary::from))
    }

    async fn list(&self, filter: &KittenFilter) -> Result<Vec<KittenSummary>, AppError> {
        let sql = format!(
            "{SUMMARY_SELECT} {FILTER_CLAUSE} {GROUP_CLAUSE} ORDER BY k.age ASC, k.id ASC LIMIT $4 OFFSET $5"
        );

        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .bind(filter.breed_id)
            .bind(filter.color.as_deref())
            .bind(filter.age)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(KittenSummary::from).collect())
    }

    async fn count(&self, filter: &KittenFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM kittens k {FILTER_CLAUSE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.breed_id)
            .bind(filter.color.as_deref())
            .bind(filter.age)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: KittenPatch) -> Result<Option<Kitten>, AppError> {
        let row = sqlx::query_as::<_, KittenRow>(
            r#"
            UPDATE kittens SET
                breed_id    = COALESCE($2, breed_id),
                color       = COALESCE($3, color),
                age         = COALESCE($4, age),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING id, breed_id, color, age, description, owner_id
            "#,
        )
        .bind(id)
        .bind(patch.breed_id)
        .bind(patch.color)
        .bind(patch.age)
        .bind(patch.description)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Kitten::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM kittens WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
