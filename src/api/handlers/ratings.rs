//! Handlers for kitten ratings.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::rating::{RateKittenRequest, RatingResponse};
use crate::api::extract::{ApiQuery, read_body};
use crate::api::middleware::auth::MaybeUser;
use crate::domain::permissions::{Action, Resource, authenticated, authorize};
use crate::error::AppError;
use crate::state::AppState;

/// Rates a kitten as the caller.
///
/// # Endpoint
///
/// `POST /api/kittens/{id}/rate`
///
/// # Request
///
/// ```json
/// {"rating": 4}
/// ```
///
/// # Errors
///
/// Returns 401 without credentials.
/// Returns 400 if the rating is outside 1..=5 or the caller already rated
/// this kitten.
/// Returns 404 if the kitten does not exist.
pub async fn rate_kitten_handler(
    State(state): State<AppState>,
    Path(kitten_id): Path<i64>,
    actor: MaybeUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RatingResponse>), AppError> {
    authorize(Action::Create, actor.as_ref(), Resource::Rating)?;
    let user = authenticated(actor.as_ref())?;

    let (request, errors) = read_body::<RateKittenRequest>(payload)?;
    errors.into_result()?;
    let score = request.rating.unwrap_or_default() as i32;

    let rating = state.rating_service.rate(kitten_id, user, score).await?;

    Ok((
        StatusCode::CREATED,
        Json(RatingResponse {
            user: user.username.clone(),
            rating: rating.rating,
        }),
    ))
}

/// Lists a kitten's ratings, best first.
///
/// # Endpoint
///
/// `GET /api/kittens/{id}/rate`
///
/// # Errors
///
/// Returns 404 if the kitten does not exist.
pub async fn list_ratings_handler(
    State(state): State<AppState>,
    Path(kitten_id): Path<i64>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Page<RatingResponse>>, AppError> {
    let request = params.resolve(&state.pagination)?;

    let (ratings, count) = state
        .rating_service
        .list_for_kitten(kitten_id, request.offset(), request.limit())
        .await?;

    let page = Page::new(request, count, ratings)?.map(RatingResponse::from);

    Ok(Json(page))
}
