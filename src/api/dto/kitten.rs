//! DTOs for kitten listings, details and writes.
//!
//! Reads embed the breed and the owner's username. Writes reference the
//! breed by id and never accept an owner.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::breed::BreedResponse;
use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::rating::RatingResponse;
use crate::api::dto::{no_nul, not_blank};
use crate::api::extract::{FromJsonFields, JsonFields};
use crate::domain::entities::{Kitten, KittenDetail, KittenPatch, KittenSummary, NewKitten};

/// Age used when a create or full update omits it.
const DEFAULT_AGE: i64 = 1;

/// Body of `POST /kittens` and `PUT /kittens/{id}`.
///
/// `color` and `description` are trimmed when read.
#[derive(Debug, Validate)]
pub struct KittenWriteRequest {
    #[validate(required(message = "This field is required."))]
    pub breed: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 50, message = "Ensure this field has no more than 50 characters.")
    )]
    pub color: Option<String>,

    #[validate(range(min = 1, max = 255, message = "Age must be between 1 and 255 months."))]
    pub age: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,
}

impl FromJsonFields for KittenWriteRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            breed: fields.integer("breed"),
            color: fields.text("color"),
            age: fields.integer("age"),
            description: fields.text("description"),
        }
    }
}

impl KittenWriteRequest {
    /// Builds the record for a validated create request.
    pub fn into_new_kitten(self, owner_id: i64) -> NewKitten {
        NewKitten {
            breed_id: self.breed.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            age: self.age.unwrap_or(DEFAULT_AGE) as i32,
            description: self.description.unwrap_or_default(),
            owner_id,
        }
    }

    /// Builds a patch replacing every writable field.
    pub fn into_full_patch(self) -> KittenPatch {
        KittenPatch {
            breed_id: self.breed,
            color: self.color,
            age: Some(self.age.unwrap_or(DEFAULT_AGE) as i32),
            description: self.description,
        }
    }
}

/// Body of `PATCH /kittens/{id}`. Omitted fields stay unchanged.
#[derive(Debug, Validate)]
pub struct KittenPatchRequest {
    pub breed: Option<i64>,

    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "Ensure this field has no more than 50 characters.")
    )]
    pub color: Option<String>,

    #[validate(range(min = 1, max = 255, message = "Age must be between 1 and 255 months."))]
    pub age: Option<i64>,

    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
}

impl FromJsonFields for KittenPatchRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            breed: fields.integer("breed"),
            color: fields.text("color"),
            age: fields.integer("age"),
            description: fields.text("description"),
        }
    }
}

impl From<KittenPatchRequest> for KittenPatch {
    fn from(request: KittenPatchRequest) -> Self {
        KittenPatch {
            breed_id: request.breed,
            color: request.color,
            age: request.age.map(|age| age as i32),
            description: request.description,
        }
    }
}

/// Filters accepted by `GET /kittens`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct KittenFilterParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub breed: Option<i64>,

    #[serde(default)]
    #[validate(custom(function = "no_nul"))]
    pub color: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub age: Option<i32>,
}

/// Combined query parameters for the kitten list.
#[derive(Debug, Default, Deserialize)]
pub struct KittenListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde(flatten)]
    pub filter: KittenFilterParams,
}

/// Kitten in listings.
#[derive(Debug, Serialize)]
pub struct KittenResponse {
    pub id: i64,
    pub breed: BreedResponse,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub owner: String,
    pub average_rating: Option<f64>,
}

impl From<KittenSummary> for KittenResponse {
    fn from(kitten: KittenSummary) -> Self {
        Self {
            id: kitten.id,
            breed: kitten.breed.into(),
            color: kitten.color,
            age: kitten.age,
            description: kitten.description,
            owner: kitten.owner,
            average_rating: kitten.average_rating,
        }
    }
}

/// Kitten with every rating, best first.
#[derive(Debug, Serialize)]
pub struct KittenDetailResponse {
    #[serde(flatten)]
    pub kitten: KittenResponse,
    pub ratings: Vec<RatingResponse>,
}

impl From<KittenDetail> for KittenDetailResponse {
    fn from(detail: KittenDetail) -> Self {
        Self {
            kitten: detail.kitten.into(),
            ratings: detail.ratings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Kitten as returned by create and update.
#[derive(Debug, Serialize)]
pub struct KittenWriteResponse {
    pub id: i64,
    pub breed: i64,
    pub color: String,
    pub age: i32,
    pub description: String,
}

impl From<Kitten> for KittenWriteResponse {
    fn from(kitten: Kitten) -> Self {
        Self {
            id: kitten.id,
            breed: kitten.breed_id,
            color: kitten.color,
            age: kitten.age,
            description: kitten.description,
        }
    }
}
