//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserCredentials};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users.
///
/// Accounts are created by operators through the admin CLI; the HTTP API
/// only reads them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Loads a user together with the password hash for login.
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError>;

    /// Lists all users ordered by username.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Grants or revokes administrator privilege.
    ///
    /// Returns `false` when no user had this ID.
    async fn set_admin(&self, id: i64, is_admin: bool) -> Result<bool, AppError>;
}
