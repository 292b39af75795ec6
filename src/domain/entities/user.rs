//! Domain entity representing an authenticated identity.

use chrono::{DateTime, Utc};

/// A user as seen by permission and ownership checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_admin,
            created_at: Utc::now(),
        }
    }
}

/// A user together with the stored password hash, used only for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input data for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(7, "user1", false);

        assert_eq!(user.id, 7);
        assert_eq!(user.username, "user1");
        assert!(!user.is_admin);
    }
}
