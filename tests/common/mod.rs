#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use kitten_catalog::api::dto::pagination::PaginationSettings;
use kitten_catalog::domain::entities::{NewUser, User};
use kitten_catalog::domain::repositories::UserRepository;
use kitten_catalog::infrastructure::persistence::PgUserRepository;
use kitten_catalog::routes;
use kitten_catalog::state::AppState;
use kitten_catalog::utils::jwt::{JwtConfig, TokenType};
use kitten_catalog::utils::password::hash_password;
use sqlx::PgPool;
use std::sync::Arc;

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-signing-secret".to_string(),
        access_ttl_secs: 300,
        refresh_ttl_secs: 3600,
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), test_jwt(), PaginationSettings::default())
}

/// The server's router, trailing-slash normalisation included, without the
/// per-IP rate limit (the test transport has no peer address).
pub fn test_app(state: AppState) -> Router {
    Router::new().fallback_service(routes::unthrottled_router(state))
}

pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(test_app(create_test_state(pool))).unwrap()
}

/// Creates a user whose password equals the username.
pub async fn create_user(pool: &PgPool, username: &str, is_admin: bool) -> User {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    repo.create(NewUser {
        username: username.to_string(),
        password_hash: hash_password(username).unwrap(),
        is_admin,
    })
    .await
    .unwrap()
}

pub fn access_token(user: &User) -> String {
    test_jwt()
        .issue(user.id, &user.username, TokenType::Access)
        .unwrap()
}

pub fn bearer(user: &User) -> String {
    format!("Bearer {}", access_token(user))
}

pub async fn create_breed(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO breeds (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_kitten(pool: &PgPool, breed_id: i64, owner_id: i64, color: &str, age: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO kittens (breed_id, color, age, description, owner_id) \
         VALUES ($1, $2, $3, 'Игривый котёнок', $4) RETURNING id",
    )
    .bind(breed_id)
    .bind(color)
    .bind(age)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_rating(pool: &PgPool, kitten_id: i64, user_id: i64, rating: i32) {
    sqlx::query("INSERT INTO ratings (kitten_id, user_id, rating) VALUES ($1, $2, $3)")
        .bind(kitten_id)
        .bind(user_id)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
