//! Handlers for kitten listings, details and owner-scoped changes.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode},
};
use serde_json::Value;
use validator::Validate;

use crate::api::dto::kitten::{
    KittenDetailResponse, KittenListQuery, KittenPatchRequest, KittenResponse,
    KittenWriteRequest, KittenWriteResponse,
};
use crate::api::dto::pagination::Page;
use crate::api::extract::{ApiQuery, read_body};
use crate::api::middleware::auth::MaybeUser;
use crate::domain::entities::{KittenFilter, KittenPatch};
use crate::domain::permissions::{Action, Resource, authenticated, authorize};
use crate::error::AppError;
use crate::state::AppState;

/// Lists kittens with their average rating, youngest first.
///
/// # Endpoint
///
/// `GET /api/kittens`
///
/// # Query Parameters
///
/// - `page`, `page_size` (optional): pagination
/// - `breed` (optional): breed id
/// - `color` (optional): exact color
/// - `age` (optional): exact age in months
pub async fn list_kittens_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KittenListQuery>,
) -> Result<Json<Page<KittenResponse>>, AppError> {
    query.filter.validate()?;
    let request = query.pagination.resolve(&state.pagination)?;

    let filter = KittenFilter::new(request.offset(), request.limit())
        .with_breed(query.filter.breed)
        .with_color(query.filter.color)
        .with_age(query.filter.age);

    let (kittens, count) = state.kitten_service.list(filter).await?;

    let page = Page::new(request, count, kittens)?.map(KittenResponse::from);

    Ok(Json(page))
}

/// Creates a kitten owned by the caller.
///
/// # Endpoint
///
/// `POST /api/kittens`
///
/// Any `owner` in the body is ignored. `age` defaults to 1.
///
/// # Errors
///
/// Returns 401 without credentials.
/// Returns 400 listing every invalid field, including an unknown breed.
pub async fn create_kitten_handler(
    State(state): State<AppState>,
    actor: MaybeUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<KittenWriteResponse>), AppError> {
    authorize(
        Action::Create,
        actor.as_ref(),
        Resource::Kitten { owner_id: None },
    )?;
    let owner = authenticated(actor.as_ref())?;

    let (request, mut errors) = read_body::<KittenWriteRequest>(payload)?;
    if let Some(breed_id) = request.breed {
        state.kitten_service.check_breed(breed_id, &mut errors).await?;
    }
    errors.into_result()?;

    let kitten = state
        .kitten_service
        .create(owner, request.into_new_kitten(owner.id))
        .await?;

    Ok((StatusCode::CREATED, Json(kitten.into())))
}

/// Returns a kitten with its ratings.
///
/// # Endpoint
///
/// `GET /api/kittens/{id}`
///
/// # Errors
///
/// Returns 404 if the kitten does not exist.
pub async fn get_kitten_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<KittenDetailResponse>, AppError> {
    let detail = state.kitten_service.get_detail(id).await?;

    Ok(Json(detail.into()))
}

/// Replaces (`PUT`) or partially updates (`PATCH`) a kitten.
///
/// # Endpoint
///
/// `PUT /api/kittens/{id}`, `PATCH /api/kittens/{id}`
///
/// `PUT` requires `breed`, `color` and `description`; a missing `age`
/// resets it to 1. `PATCH` changes only the fields present.
///
/// # Errors
///
/// Returns 401 without credentials, 404 if the kitten does not exist,
/// 403 unless the caller owns the kitten or is an administrator, and 400
/// for invalid fields, in that order.
pub async fn update_kitten_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    method: Method,
    actor: MaybeUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<KittenWriteResponse>, AppError> {
    authenticated(actor.as_ref())?;

    let kitten = state.kitten_service.find(id).await?;
    authorize(
        Action::from_method(&method),
        actor.as_ref(),
        Resource::Kitten {
            owner_id: Some(kitten.owner_id),
        },
    )?;

    let (breed_id, mut errors, patch) = if method == Method::PATCH {
        let (request, errors) = read_body::<KittenPatchRequest>(payload)?;
        (request.breed, errors, KittenPatch::from(request))
    } else {
        let (request, errors) = read_body::<KittenWriteRequest>(payload)?;
        (request.breed, errors, request.into_full_patch())
    };

    if let Some(breed_id) = breed_id {
        state.kitten_service.check_breed(breed_id, &mut errors).await?;
    }
    errors.into_result()?;

    let updated = state.kitten_service.update(id, patch).await?;

    Ok(Json(updated.into()))
}

/// Deletes a kitten and its ratings.
///
/// # Endpoint
///
/// `DELETE /api/kittens/{id}`
///
/// # Errors
///
/// Returns 401 without credentials, 404 if the kitten does not exist and
/// 403 unless the caller owns the kitten or is an administrator.
pub async fn delete_kitten_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    actor: MaybeUser,
) -> Result<StatusCode, AppError> {
    authenticated(actor.as_ref())?;

    let kitten = state.kitten_service.find(id).await?;
    authorize(
        Action::Delete,
        actor.as_ref(),
        Resource::Kitten {
            owner_id: Some(kitten.owner_id),
        },
    )?;

    state.kitten_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
