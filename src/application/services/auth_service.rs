//! Authentication service: login, token refresh and bearer-token checks.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::jwt::{JwtConfig, TokenError, TokenType};
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";
const INVALID_TOKEN: &str = "Token is invalid or expired";

/// Access and refresh tokens handed out on login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Service issuing and checking JWTs for users stored in the repository.
///
/// Tokens only carry the user id; the user is reloaded on every request so
/// privilege changes and deletions take effect immediately.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtConfig,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, jwt: JwtConfig) -> Self {
        Self { repository, jwt }
    }

    /// Exchanges a username and password for a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password does not match. Both cases produce the same message.
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let Some(credentials) = self.repository.find_credentials(username).await? else {
            tracing::info!(username, "Login failed: unknown user");
            return Err(invalid_credentials());
        };

        let password = password.to_string();
        let hash = credentials.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                AppError::internal("Password verification failed", json!({}))
            })?
            .map_err(|e| {
                tracing::error!(error = %e, user_id = credentials.user.id, "Stored password hash is unreadable");
                AppError::internal("Password verification failed", json!({}))
            })?;

        if !matches {
            tracing::info!(username, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let user = credentials.user;
        let access = self.issue(&user, TokenType::Access)?;
        let refresh = self.issue(&user, TokenType::Refresh)?;

        tracing::info!(user_id = user.id, username = %user.username, "Token pair issued");

        Ok(TokenPair { access, refresh })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// not a refresh token, or belongs to a user that no longer exists.
    pub async fn refresh_token(&self, refresh: &str) -> Result<String, AppError> {
        let claims = self
            .jwt
            .verify(refresh, TokenType::Refresh)
            .map_err(invalid_token)?;

        let user = self
            .repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN, json!({"reason": "user_not_found"})))?;

        self.issue(&user, TokenType::Access)
    }

    /// Resolves the user behind an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or the user
    /// no longer exists.
    pub async fn authenticate(&self, access: &str) -> Result<User, AppError> {
        let claims = self
            .jwt
            .verify(access, TokenType::Access)
            .map_err(invalid_token)?;

        self.repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN, json!({"reason": "user_not_found"})))
    }

    fn issue(&self, user: &User, token_type: TokenType) -> Result<String, AppError> {
        self.jwt
            .issue(user.id, &user.username, token_type)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign token");
                AppError::internal("Failed to issue token", json!({}))
            })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, json!({}))
}

fn invalid_token(e: TokenError) -> AppError {
    tracing::debug!(error = %e, "Rejected token");
    AppError::unauthorized(INVALID_TOKEN, json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserCredentials;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::hash_password;

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-signing-secret".to_string(),
            access_ttl_secs: 300,
            refresh_ttl_secs: 3600,
        }
    }

    fn credentials(id: i64, username: &str, password: &str) -> UserCredentials {
        UserCredentials {
            user: User::new(id, username, false),
            password_hash: hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_obtain_token_success() {
        let mut mock_repo = MockUserRepository::new();
        let stored = credentials(1, "user1", "secret");

        mock_repo
            .expect_find_credentials()
            .withf(|name| name == "user1")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let pair = service.obtain_token("user1", "secret").await.unwrap();

        let access = test_jwt().verify(&pair.access, TokenType::Access).unwrap();
        let refresh = test_jwt().verify(&pair.refresh, TokenType::Refresh).unwrap();
        assert_eq!(access.sub, 1);
        assert_eq!(refresh.sub, 1);
    }

    #[tokio::test]
    async fn test_obtain_token_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let stored = credentials(1, "user1", "secret");

        mock_repo
            .expect_find_credentials()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.obtain_token("user1", "wrong").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_obtain_token_unknown_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_credentials()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.obtain_token("ghost", "secret").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(Some(User::new(5, "user5", false))));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());
        let refresh = test_jwt().issue(5, "user5", TokenType::Refresh).unwrap();

        let access = service.refresh_token(&refresh).await.unwrap();

        let claims = test_jwt().verify(&access, TokenType::Access).unwrap();
        assert_eq!(claims.sub, 5);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_jwt());
        let access = test_jwt().issue(5, "user5", TokenType::Access).unwrap();

        let result = service.refresh_token(&access).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_returns_current_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(User::new(3, "admin", true))));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());
        let token = test_jwt().issue(3, "admin", TokenType::Access).unwrap();

        let user = service.authenticate(&token).await.unwrap();

        assert_eq!(user.id, 3);
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());
        let token = test_jwt().issue(3, "gone", TokenType::Access).unwrap();

        let result = service.authenticate(&token).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_garbage_token() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.authenticate("garbage").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }
}
