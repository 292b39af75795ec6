//! Request extractors that report failures in the API error format.

use axum::{
    Json,
    extract::{FromRequestParts, Query, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::error::{AppError, FieldErrors};

/// Query string extractor whose rejection is a 400 [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                AppError::bad_request("Invalid query parameters", json!({"query": e.body_text()}))
            })?;

        Ok(ApiQuery(value))
    }
}

/// Unwraps a JSON body taken as `Result<Json<T>, JsonRejection>`.
///
/// Write handlers take the body this way so permission checks run before a
/// malformed body is reported.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::bad_request(
            "Invalid request body",
            json!({"body": rejection.body_text()}),
        )),
    }
}

/// Field-by-field reader over a JSON object body.
///
/// A field of the wrong type is recorded and read as absent, so one bad
/// field never hides the problems of the others.
#[derive(Debug)]
pub struct JsonFields {
    object: Map<String, Value>,
    errors: FieldErrors,
}

impl JsonFields {
    /// # Errors
    ///
    /// Returns a 400 [`AppError`] when the body is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(object) => Ok(Self {
                object,
                errors: FieldErrors::new(),
            }),
            other => Err(AppError::field(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(&other)
                ),
            )),
        }
    }

    /// Reads an integer; numeric strings such as `"3"` are accepted.
    pub fn integer(&mut self, name: &str) -> Option<i64> {
        let value = self.take(name)?;
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(name, "A valid integer is required.");
        }
        parsed
    }

    /// Reads a string as sent.
    pub fn string(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.errors.add(name, "Not a valid string.");
                None
            }
        }
    }

    /// Reads a string with surrounding whitespace removed.
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.string(name).map(|s| s.trim().to_string())
    }

    /// Type errors recorded so far.
    pub fn finish(self) -> FieldErrors {
        self.errors
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        match self.object.remove(name)? {
            Value::Null => {
                self.errors.add(name, "This field may not be null.");
                None
            }
            value => Some(value),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Request bodies built from [`JsonFields`].
pub trait FromJsonFields: Sized {
    fn from_fields(fields: &mut JsonFields) -> Self;
}

/// Reads a write request body and validates it.
///
/// Returns the request together with every type and validation error found,
/// so handlers can add their own checks before failing.
///
/// # Errors
///
/// Returns a 400 [`AppError`] when the body is not a JSON object.
pub fn read_body<T>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(T, FieldErrors), AppError>
where
    T: FromJsonFields + Validate,
{
    let mut fields = JsonFields::from_value(json_body(payload)?)?;
    let request = T::from_fields(&mut fields);

    let mut errors = fields.finish();
    errors.merge(FieldErrors::from_validation(request.validate()));

    Ok((request, errors))
}
