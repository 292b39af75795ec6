//! API route configuration.
//!
//! Catalogue routes accept an optional Bearer token via
//! [`crate::api::middleware::auth`]; the token endpoints take credentials in
//! the body instead.

use crate::api::handlers::{
    create_breed_handler, create_kitten_handler, delete_kitten_handler, get_kitten_handler,
    list_breeds_handler, list_kittens_handler, list_ratings_handler, obtain_token_handler,
    rate_kitten_handler, refresh_token_handler, update_kitten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Breed, kitten and rating routes.
///
/// # Endpoints
///
/// - `GET    /breeds`             - List breeds (paginated)
/// - `POST   /breeds`             - Add a breed (administrators)
/// - `GET    /kittens`            - List kittens (paginated, filterable)
/// - `POST   /kittens`            - Create a kitten owned by the caller
/// - `GET    /kittens/{id}`       - Kitten with ratings
/// - `PUT    /kittens/{id}`       - Replace a kitten (owner or administrator)
/// - `PATCH  /kittens/{id}`       - Partially update a kitten (owner or administrator)
/// - `DELETE /kittens/{id}`       - Delete a kitten (owner or administrator)
/// - `GET    /kittens/{id}/rate`  - List a kitten's ratings (paginated)
/// - `POST   /kittens/{id}/rate`  - Rate a kitten once per user
pub fn catalogue_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/breeds",
            get(list_breeds_handler).post(create_breed_handler),
        )
        .route(
            "/kittens",
            get(list_kittens_handler).post(create_kitten_handler),
        )
        .route(
            "/kittens/{id}",
            get(get_kitten_handler)
                .put(update_kitten_handler)
                .patch(update_kitten_handler)
                .delete(delete_kitten_handler),
        )
        .route(
            "/kittens/{id}/rate",
            get(list_ratings_handler).post(rate_kitten_handler),
        )
}

/// Token routes.
///
/// # Endpoints
///
/// - `POST /auth/token`          - Obtain an access and refresh token pair
/// - `POST /auth/token/refresh`  - Obtain a new access token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(obtain_token_handler))
        .route("/auth/token/refresh", post(refresh_token_handler))
}
