//! Maps domain errors and request rejections to HTTP responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::{ValidationError, ValidationErrors};

use authgate_core::error::{AppError, ErrorKind};

/// Message returned for every infrastructure failure.
const SERVER_ERROR: &str = "Server Error";

/// Error type returned by every handler and extractor.
///
/// Besides the 401, 422 and 500 shapes, a duplicate registration answers
/// `409 Conflict` with `{"error": true, "message": ...}` so clients can tell
/// a taken email apart from a malformed request.
#[derive(Debug)]
pub enum ApiError {
    /// A domain error raised by a service.
    App(AppError),
    /// Field-level request validation failures.
    Validation(ValidationErrors),
    /// The request body was not acceptable JSON.
    Json(JsonRejection),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Json(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => app_error_response(err),
            Self::Validation(errors) => validation_response(&errors),
            Self::Json(rejection) => (
                rejection.status(),
                Json(json!({ "message": rejection.body_text() })),
            )
                .into_response(),
        }
    }
}

fn app_error_response(err: AppError) -> Response {
    if err.kind.is_infrastructure() {
        tracing::error!(
            kind = %err.kind,
            error = %err.message,
            source = ?err.source,
            "Request failed"
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": SERVER_ERROR })),
        )
            .into_response();
    }

    let (status, body) = match err.kind {
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": err.message })),
        ErrorKind::Unauthenticated => {
            (StatusCode::UNAUTHORIZED, json!({ "message": err.message }))
        }
        ErrorKind::Validation => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "message": err.message, "errors": {} }),
        ),
        ErrorKind::Conflict => (
            StatusCode::CONFLICT,
            json!({ "error": true, "message": err.message }),
        ),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, json!({ "message": err.message })),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": SERVER_ERROR }),
        ),
    };

    (status, Json(body)).into_response()
}

fn validation_response(errors: &ValidationErrors) -> Response {
    let fields = collect_field_messages(errors);
    let total: usize = fields.values().map(Vec::len).sum();

    let message = match fields.values().flatten().next() {
        Some(first) if total > 1 => {
            let rest = total - 1;
            let noun = if rest == 1 { "error" } else { "errors" };
            format!("{first} (and {rest} more {noun})")
        }
        Some(first) => first.clone(),
        None => "The given data was invalid.".to_string(),
    };

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": message, "errors": fields })),
    )
        .into_response()
}

/// Field name to human-readable messages, ordered by field name.
///
/// A blank required field reports only that it is required.
fn collect_field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = match errs.iter().find(|e| is_blank_required(e)) {
                Some(required) => vec![render_message(&field, required)],
                None => errs.iter().map(|e| render_message(&field, e)).collect(),
            };
            (field, messages)
        })
        .collect()
}

fn is_blank_required(error: &ValidationError) -> bool {
    error.code == "length"
        && error
            .params
            .get("value")
            .and_then(|v| v.as_str())
            .is_some_and(|v| v.trim().is_empty())
}

fn render_message(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = field.replace('_', " ");

    match error.code.as_ref() {
        "length" if is_blank_required(error) => format!("The {label} field is required."),
        "length" => match (error.params.get("max"), error.params.get("min")) {
            (Some(max), _) => format!("The {label} must not be greater than {max} characters."),
            (None, Some(min)) => format!("The {label} must be at least {min} characters."),
            (None, None) => format!("The {label} has an invalid length."),
        },
        "email" => format!("The {label} must be a valid email address."),
        _ => format!("The {label} field is invalid."),
    }
}
