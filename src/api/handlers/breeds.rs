//! Handlers for the breed catalogue.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::dto::breed::{BreedResponse, CreateBreedRequest};
use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::extract::{ApiQuery, read_body};
use crate::api::middleware::auth::MaybeUser;
use crate::domain::permissions::{Action, Resource, authorize};
use crate::error::AppError;
use crate::state::AppState;

/// Lists breeds ordered by name.
///
/// # Endpoint
///
/// `GET /api/breeds`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page
pub async fn list_breeds_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<Page<BreedResponse>>, AppError> {
    let request = params.resolve(&state.pagination)?;

    let (breeds, count) = state
        .breed_service
        .list(request.offset(), request.limit())
        .await?;

    let page = Page::new(request, count, breeds)?.map(BreedResponse::from);

    Ok(Json(page))
}

/// Adds a breed.
///
/// # Endpoint
///
/// `POST /api/breeds`
///
/// # Errors
///
/// Returns 401 without credentials and 403 for non-administrators.
/// Returns 400 if the name is missing, blank, too long or already taken.
pub async fn create_breed_handler(
    State(state): State<AppState>,
    actor: MaybeUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BreedResponse>), AppError> {
    authorize(Action::Create, actor.as_ref(), Resource::Breed)?;

    let (request, errors) = read_body::<CreateBreedRequest>(payload)?;
    errors.into_result()?;

    let name = request.name.unwrap_or_default();
    let breed = state.breed_service.create(&name).await?;

    Ok((StatusCode::CREATED, Json(breed.into())))
}
