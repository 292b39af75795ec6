//! Security helpers shared by the server and the admin CLI.
//!
//! - [`jwt`] - Access/refresh token issuing and verification
//! - [`password`] - Argon2id password hashing

pub mod jwt;
pub mod password;
