//! Domain entity representing a catalogued kitten.

use super::{Breed, RatingView};

/// Youngest accepted age, in months.
pub const KITTEN_MIN_AGE: i64 = 1;

/// Oldest accepted age, in months.
pub const KITTEN_MAX_AGE: i64 = 255;

/// A kitten record as stored.
///
/// `owner_id` is the user who created the record; only that user or an
/// administrator may change or delete it.
#[derive(Debug, Clone, PartialEq)]
pub struct Kitten {
    pub id: i64,
    pub breed_id: i64,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub owner_id: i64,
}

/// Input data for creating a kitten. The owner is always the caller.
#[derive(Debug, Clone)]
pub struct NewKitten {
    pub breed_id: i64,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub owner_id: i64,
}

/// Partial update of a kitten. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct KittenPatch {
    pub breed_id: Option<i64>,
    pub color: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
}

impl KittenPatch {
    pub fn is_empty(&self) -> bool {
        self.breed_id.is_none()
            && self.color.is_none()
            && self.age.is_none()
            && self.description.is_none()
    }
}

/// Kitten joined with its breed, owner name and average rating.
///
/// `average_rating` is computed at query time and is `None` when the kitten
/// has not been rated yet.
#[derive(Debug, Clone, PartialEq)]
pub struct KittenSummary {
    pub id: i64,
    pub breed: Breed,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub owner_id: i64,
    pub owner: String,
    pub average_rating: Option<f64>,
}

/// Summary plus every rating of the kitten, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct KittenDetail {
    pub kitten: KittenSummary,
    pub ratings: Vec<RatingView>,
}

/// Filters and paging window for kitten listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KittenFilter {
    pub breed_id: Option<i64>,
    pub color: Option<String>,
    pub age: Option<i32>,
    pub offset: i64,
    pub limit: i64,
}

impl KittenFilter {
    /// Creates a filter with pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    pub fn with_breed(mut self, breed_id: Option<i64>) -> Self {
        self.breed_id = breed_id;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn with_age(mut self, age: Option<i32>) -> Self {
        self.age = age;
        self
    }
}
