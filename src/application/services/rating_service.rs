//! Rating service.

use std::sync::Arc;

use crate::application::services::kitten_service::kitten_not_found;
use crate::domain::entities::{NewRating, Rating, RatingView, User};
use crate::domain::repositories::{KittenRepository, RatingRepository};
use crate::error::AppError;

/// Records and lists ratings. Each user may rate a kitten once.
pub struct RatingService<R: RatingRepository, K: KittenRepository> {
    rating_repository: Arc<R>,
    kitten_repository: Arc<K>,
}

impl<R: RatingRepository, K: KittenRepository> RatingService<R, K> {
    pub fn new(rating_repository: Arc<R>, kitten_repository: Arc<K>) -> Self {
        Self {
            rating_repository,
            kitten_repository,
        }
    }

    /// Stores `user`'s score for a kitten.
    ///
    /// The score must already be validated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the kitten does not exist and
    /// [`AppError::Validation`] if the user already rated it.
    pub async fn rate(&self, kitten_id: i64, user: &User, rating: i32) -> Result<Rating, AppError> {
        self.ensure_kitten(kitten_id).await?;

        let stored = self
            .rating_repository
            .create(NewRating {
                kitten_id,
                user_id: user.id,
                rating,
            })
            .await?;

        tracing::info!(
            kitten_id,
            user = %user.username,
            rating,
            "Kitten rated"
        );

        Ok(stored)
    }

    /// Returns one page of a kitten's ratings, best first, with the total count.
    pub async fn list_for_kitten(
        &self,
        kitten_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RatingView>, i64), AppError> {
        self.ensure_kitten(kitten_id).await?;

        tokio::try_join!(
            self.rating_repository
                .list_for_kitten(kitten_id, offset, limit),
            self.rating_repository.count_for_kitten(kitten_id)
        )
    }

    async fn ensure_kitten(&self, kitten_id: i64) -> Result<(), AppError> {
        match self.kitten_repository.find_by_id(kitten_id).await? {
            Some(_) => Ok(()),
            None => Err(kitten_not_found(kitten_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Kitten;
    use crate::domain::repositories::{MockKittenRepository, MockRatingRepository};

    fn existing_kitten(kittens: &mut MockKittenRepository) {
        kittens.expect_find_by_id().returning(|id| {
            Ok(Some(Kitten {
                id,
                breed_id: 1,
                color: "Белый".to_string(),
                age: 3,
                description: "Любопытный котёнок".to_string(),
                owner_id: 1,
            }))
        });
    }

    #[tokio::test]
    async fn test_rate_uses_caller_as_author() {
        let mut kittens = MockKittenRepository::new();
        let mut ratings = MockRatingRepository::new();
        existing_kitten(&mut kittens);

        ratings
            .expect_create()
            .withf(|new| new.kitten_id == 3 && new.user_id == 2 && new.rating == 4)
            .times(1)
            .returning(|new| {
                Ok(Rating {
                    id: 10,
                    kitten_id: new.kitten_id,
                    user_id: new.user_id,
                    rating: new.rating,
                })
            });

        let service = RatingService::new(Arc::new(ratings), Arc::new(kittens));
        let user = User::new(2, "user2", false);

        let rating = service.rate(3, &user, 4).await.unwrap();

        assert_eq!(rating.id, 10);
        assert_eq!(rating.user_id, 2);
    }

    #[tokio::test]
    async fn test_rate_missing_kitten() {
        let mut kittens = MockKittenRepository::new();
        let mut ratings = MockRatingRepository::new();

        kittens.expect_find_by_id().times(1).returning(|_| Ok(None));
        ratings.expect_create().never();

        let service = RatingService::new(Arc::new(ratings), Arc::new(kittens));
        let user = User::new(2, "user2", false);

        let result = service.rate(99, &user, 5).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rate_twice_is_rejected() {
        let mut kittens = MockKittenRepository::new();
        let mut ratings = MockRatingRepository::new();
        existing_kitten(&mut kittens);

        ratings.expect_create().times(1).returning(|_| {
            Err(AppError::field(
                "non_field_errors",
                "You have already rated this kitten.",
            ))
        });

        let service = RatingService::new(Arc::new(ratings), Arc::new(kittens));
        let user = User::new(1, "user1", false);

        let result = service.rate(1, &user, 5).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_for_kitten_returns_count() {
        let mut kittens = MockKittenRepository::new();
        let mut ratings = MockRatingRepository::new();
        existing_kitten(&mut kittens);

        ratings
            .expect_list_for_kitten()
            .withf(|kitten_id, offset, limit| *kitten_id == 1 && *offset == 0 && *limit == 10)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![RatingView {
                    user: "user1".to_string(),
                    rating: 5,
                }])
            });
        ratings
            .expect_count_for_kitten()
            .times(1)
            .returning(|_| Ok(1));

        let service = RatingService::new(Arc::new(ratings), Arc::new(kittens));

        let (items, count) = service.list_for_kitten(1, 0, 10).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(count, 1);
    }
}
