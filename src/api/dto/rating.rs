//! DTOs for kitten ratings.

use serde::Serialize;
use validator::Validate;

use crate::api::extract::{FromJsonFields, JsonFields};
use crate::domain::entities::RatingView;

/// Request body for rating a kitten. Kitten and user come from the request.
#[derive(Debug, Validate)]
pub struct RateKittenRequest {
    #[validate(
        required(message = "This field is required."),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5.")
    )]
    pub rating: Option<i64>,
}

impl FromJsonFields for RateKittenRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            rating: fields.integer("rating"),
        }
    }
}

/// A rating as shown to clients: author's username and score.
#[derive(Debug, Serialize, PartialEq)]
pub struct RatingResponse {
    pub user: String,
    pub rating: i32,
}

impl From<RatingView> for RatingResponse {
    fn from(view: RatingView) -> Self {
        Self {
            user: view.user,
            rating: view.rating,
        }
    }
}
