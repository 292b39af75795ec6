//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`            - Health check: database (public)
//! - `/api/breeds`, `/api/kittens/*` - Catalogue (optional Bearer token)
//! - `/api/auth/*`             - Token endpoints (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the token endpoints
//! - **Authentication** - Optional Bearer access token on the catalogue
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let auth_router = if behind_proxy {
        api::routes::auth_routes().layer(rate_limit::auth_layer_behind_proxy())
    } else {
        api::routes::auth_routes().layer(rate_limit::auth_layer())
    };

    compose(state, auth_router)
}

/// Same routes and middleware as [`app_router`] without the per-IP limit on
/// the token endpoints.
///
/// For in-process clients that have no peer socket address.
pub fn unthrottled_router(state: AppState) -> NormalizePath<Router> {
    compose(state, api::routes::auth_routes())
}

fn compose(state: AppState, auth_router: Router<AppState>) -> NormalizePath<Router> {
    let api_router = api::routes::catalogue_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .merge(auth_router);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
