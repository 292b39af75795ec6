//! Handlers for JWT issuance and refresh.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::api::dto::auth::{
    AccessTokenResponse, TokenObtainRequest, TokenPairResponse, TokenRefreshRequest,
};
use crate::api::extract::read_body;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for an access and refresh token pair.
///
/// # Endpoint
///
/// `POST /api/auth/token`
///
/// # Errors
///
/// Returns 400 if a field is missing.
/// Returns 401 if the credentials do not match an account.
pub async fn obtain_token_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let (request, errors) = read_body::<TokenObtainRequest>(payload)?;
    errors.into_result()?;

    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let pair = state.auth_service.obtain_token(&username, &password).await?;

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// `POST /api/auth/token/refresh`
///
/// # Errors
///
/// Returns 400 if `refresh` is missing.
/// Returns 401 if the token is invalid, expired or not a refresh token.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let (request, errors) = read_body::<TokenRefreshRequest>(payload)?;
    errors.into_result()?;

    let refresh = request.refresh.unwrap_or_default();
    let access = state.auth_service.refresh_token(&refresh).await?;

    Ok(Json(AccessTokenResponse { access }))
}
