mod common;

use kitten_catalog::domain::entities::NewUser;
use kitten_catalog::domain::repositories::UserRepository;
use kitten_catalog::error::AppError;
use kitten_catalog::infrastructure::persistence::PgUserRepository;
use kitten_catalog::utils::password::{hash_password, verify_password};
use sqlx::PgPool;
use std::sync::Arc;

fn repo(pool: &PgPool) -> PgUserRepository {
    PgUserRepository::new(Arc::new(pool.clone()))
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: hash_password("secret").unwrap(),
        is_admin: false,
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let repo = repo(&pool);

    let user = repo.create(new_user("user1")).await.unwrap();

    assert!(!user.is_admin);
    assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(repo.find_by_username("user1").await.unwrap(), Some(user));
    assert!(repo.find_by_username("user2").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_credentials_carry_password_hash(pool: PgPool) {
    let repo = repo(&pool);
    repo.create(new_user("user1")).await.unwrap();

    let credentials = repo.find_credentials("user1").await.unwrap().unwrap();

    assert_eq!(credentials.user.username, "user1");
    assert!(verify_password("secret", &credentials.password_hash).unwrap());
    assert!(!verify_password("wrong", &credentials.password_hash).unwrap());
}

#[sqlx::test]
async fn test_duplicate_username(pool: PgPool) {
    let repo = repo(&pool);
    repo.create(new_user("user1")).await.unwrap();

    let result = repo.create(new_user("user1")).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_set_admin_and_list(pool: PgPool) {
    let repo = repo(&pool);
    let bob = repo.create(new_user("bob")).await.unwrap();
    repo.create(new_user("alice")).await.unwrap();

    assert!(repo.set_admin(bob.id, true).await.unwrap());
    assert!(!repo.set_admin(bob.id + 100, true).await.unwrap());

    let users = repo.list().await.unwrap();
    let view: Vec<_> = users
        .iter()
        .map(|u| (u.username.as_str(), u.is_admin))
        .collect();

    assert_eq!(view, vec![("alice", false), ("bob", true)]);
}
