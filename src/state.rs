//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::api::dto::pagination::PaginationSettings;
use crate::application::services::{AuthService, BreedService, KittenService, RatingService};
use crate::infrastructure::persistence::{
    PgBreedRepository, PgKittenRepository, PgRatingRepository, PgUserRepository,
};
use crate::utils::jwt::JwtConfig;

pub type AppAuthService = AuthService<PgUserRepository>;
pub type AppBreedService = BreedService<PgBreedRepository>;
pub type AppKittenService = KittenService<PgKittenRepository, PgBreedRepository, PgRatingRepository>;
pub type AppRatingService = RatingService<PgRatingRepository, PgKittenRepository>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AppAuthService>,
    pub breed_service: Arc<AppBreedService>,
    pub kitten_service: Arc<AppKittenService>,
    pub rating_service: Arc<AppRatingService>,
    pub pool: Arc<PgPool>,
    pub pagination: PaginationSettings,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(pool: Arc<PgPool>, jwt: JwtConfig, pagination: PaginationSettings) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let breed_repository = Arc::new(PgBreedRepository::new(pool.clone()));
        let kitten_repository = Arc::new(PgKittenRepository::new(pool.clone()));
        let rating_repository = Arc::new(PgRatingRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(user_repository, jwt)),
            breed_service: Arc::new(BreedService::new(breed_repository.clone())),
            kitten_service: Arc::new(KittenService::new(
                kitten_repository.clone(),
                breed_repository,
                rating_repository.clone(),
            )),
            rating_service: Arc::new(RatingService::new(rating_repository, kitten_repository)),
            pool,
            pagination,
        }
    }
}
