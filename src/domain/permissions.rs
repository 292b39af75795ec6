//! Access rules for catalogue resources.
//!
//! Reads are always allowed. Writes need an authenticated actor, and some of
//! them need more:
//!
//! | Resource | Create        | Update / Delete      |
//! |----------|---------------|----------------------|
//! | Breed    | administrator | administrator        |
//! | Kitten   | any user      | owner or administrator |
//! | Rating   | any user      | nobody               |
//!
//! Handlers call [`authorize`] before touching storage. An anonymous write is
//! reported as [`Decision::AuthenticationRequired`] (HTTP 401), an
//! authenticated but insufficient actor as [`Decision::Denied`] (HTTP 403).

use axum::http::Method;
use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;

/// What the request wants to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Maps an HTTP method onto an action. `GET`, `HEAD` and `OPTIONS` are reads.
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::POST => Action::Create,
            Method::PUT | Method::PATCH => Action::Update,
            Method::DELETE => Action::Delete,
            _ => Action::Read,
        }
    }

    pub fn is_safe(self) -> bool {
        self == Action::Read
    }
}

/// The resource an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Breed,
    /// A kitten; `owner_id` is `None` for the collection (creation).
    Kitten { owner_id: Option<i64> },
    Rating,
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    AuthenticationRequired,
    Denied,
}

/// Evaluates the access table for one request.
pub fn decide(action: Action, actor: Option<&User>, resource: Resource) -> Decision {
    if action.is_safe() {
        return Decision::Allow;
    }

    let Some(actor) = actor else {
        return Decision::AuthenticationRequired;
    };

    let allowed = match (resource, action) {
        (Resource::Breed, _) => actor.is_admin,
        (Resource::Kitten { .. }, Action::Create) => true,
        (Resource::Kitten { owner_id }, _) => {
            actor.is_admin || owner_id.is_some_and(|owner| owner == actor.id)
        }
        (Resource::Rating, Action::Create) => true,
        (Resource::Rating, _) => false,
    };

    if allowed {
        Decision::Allow
    } else {
        Decision::Denied
    }
}

/// `true` when the actor may perform the action.
pub fn can_write(action: Action, actor: Option<&User>, resource: Resource) -> bool {
    decide(action, actor, resource) == Decision::Allow
}

/// Returns the actor, or the authentication-required error for anonymous callers.
///
/// Used where a resource must be loaded before the full check can run.
pub fn authenticated(actor: Option<&User>) -> Result<&User, AppError> {
    actor.ok_or_else(authentication_required)
}

/// Like [`decide`], but returns the matching API error when not allowed.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] for anonymous writes and
/// [`AppError::Forbidden`] when the actor lacks rights.
pub fn authorize(action: Action, actor: Option<&User>, resource: Resource) -> Result<(), AppError> {
    match decide(action, actor, resource) {
        Decision::Allow => Ok(()),
        Decision::AuthenticationRequired => Err(authentication_required()),
        Decision::Denied => Err(AppError::forbidden(
            "You do not have permission to perform this action.",
            json!({}),
        )),
    }
}

fn authentication_required() -> AppError {
    AppError::unauthorized("Authentication credentials were not provided.", json!({}))
}
