//! Data Transfer Objects for API requests and responses.
//!
//! Responses are serialized with Serde. Request bodies are read field by
//! field through [`crate::api::extract::JsonFields`] and then checked with
//! validator, so a missing field, a field of the wrong type and an invalid
//! value are all reported together.

use std::borrow::Cow;

use validator::ValidationError;

pub mod auth;
pub mod breed;
pub mod health;
pub mod kitten;
pub mod pagination;
pub mod rating;

/// Rejects strings containing U+0000, which PostgreSQL cannot store.
pub(crate) fn no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("null_characters_not_allowed")
            .with_message(Cow::Borrowed("Null characters are not allowed.")));
    }
    Ok(())
}

/// Rejects strings that are empty after trimming. Implies [`no_nul`].
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    no_nul(value)?;
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}
