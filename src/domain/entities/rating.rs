//! Domain entity representing a user's score for a kitten.

/// Lowest accepted score.
pub const RATING_MIN: i64 = 1;

/// Highest accepted score.
pub const RATING_MAX: i64 = 5;

/// A stored rating. There is at most one per (kitten, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: i64,
    pub kitten_id: i64,
    pub user_id: i64,
    pub rating: i32,
}

/// Input data for rating a kitten. Kitten and user come from the request
/// context, never from the client payload.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub kitten_id: i64,
    pub user_id: i64,
    pub rating: i32,
}

/// Rating as shown to clients: the author's username and the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingView {
    pub user: String,
    pub rating: i32,
}
