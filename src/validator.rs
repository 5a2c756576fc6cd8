//! Validated JSON extraction.
//!
//! [`ValidatedJson`] deserializes the body and runs the DTO's `validator`
//! rules before the handler sees it, so every malformed request is rejected
//! up front with a field-specific message and no side effects. Serde-level
//! failures map to 400, rule failures to 422.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(collect_messages(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request("Missing 'Content-Type: application/json' header");
    }

    // Serde's messages leak Rust type names; translate the common cases into
    // something a client can act on.
    let detail = rejection.body_text();
    if let Some(rest) = detail.split("missing field `").nth(1) {
        let field = rest.split('`').next().unwrap_or("unknown");
        return AppError::bad_request(format!("{} is required", field));
    }
    if detail.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request");
    }

    AppError::bad_request("Invalid request body")
}

fn collect_messages(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
