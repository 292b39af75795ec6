//! DTOs for token issuance and refresh.

use serde::Serialize;
use validator::Validate;

use crate::api::dto::no_nul;
use crate::api::extract::{FromJsonFields, JsonFields};

/// Login credentials.
#[derive(Validate)]
pub struct TokenObtainRequest {
    #[validate(
        required(message = "This field is required."),
        custom(function = "no_nul")
    )]
    pub username: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

impl FromJsonFields for TokenObtainRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            username: fields.text("username"),
            password: fields.string("password"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Validate)]
pub struct TokenRefreshRequest {
    #[validate(required(message = "This field is required."))]
    pub refresh: Option<String>,
}

impl FromJsonFields for TokenRefreshRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            refresh: fields.text("refresh"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}
