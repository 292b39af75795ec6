//! DTOs for the breed endpoints.

use serde::Serialize;
use validator::Validate;

use crate::api::dto::not_blank;
use crate::api::extract::{FromJsonFields, JsonFields};
use crate::domain::entities::Breed;

/// Request to add a breed.
#[derive(Debug, Validate)]
pub struct CreateBreedRequest {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
}

impl FromJsonFields for CreateBreedRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            name: fields.text("name"),
        }
    }
}

/// A breed as returned by the API.
#[derive(Debug, Serialize, PartialEq)]
pub struct BreedResponse {
    pub id: i64,
    pub name: String,
}

impl From<Breed> for BreedResponse {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::extract::read_body;
    use axum::Json;
    use serde_json::json;

    #[test]
    fn test_missing_name() {
        let (_, errors) = read_body::<CreateBreedRequest>(Ok(Json(json!({})))).unwrap();
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_name_is_trimmed() {
        let (request, errors) =
            read_body::<CreateBreedRequest>(Ok(Json(json!({"name": "  Сфинкс "})))).unwrap();
        assert!(errors.is_empty());
        assert_eq!(request.name.as_deref(), Some("Сфинкс"));
    }

    #[test]
    fn test_name_with_nul() {
        let request = CreateBreedRequest {
            name: Some("Сфи\0нкс".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_name_of_wrong_type() {
        let (_, errors) =
            read_body::<CreateBreedRequest>(Ok(Json(json!({"name": ["Сфинкс"]})))).unwrap();
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_blank_name() {
        let request = CreateBreedRequest {
            name: Some("   ".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_long_name() {
        let request = CreateBreedRequest {
            name: Some("x".repeat(101)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_name() {
        let request = CreateBreedRequest {
            name: Some("Мейн-кун".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
