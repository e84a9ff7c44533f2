use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// Tracing target for error responses.
const TRACING_TARGET: &str = "clinic_server::handler::errors";

/// The `error` object of a failure envelope.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Machine readable error code, e.g. `not_found`.
    pub code: Cow<'a, str>,
    /// Message safe to show to the caller.
    pub message: Cow<'a, str>,
    /// The resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,

    /// Internal context for debugging, never serialized.
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code, serialized on the envelope instead.
    #[serde(skip)]
    pub status: StatusCode,
}

/// Body of every failed response.
///
/// ```json
/// { "success": false, "error": { "code": "not_found", "message": "Patient not found" }, "status": 404 }
/// ```
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorEnvelope<'a> {
    /// Always `false`.
    pub success: bool,
    pub error: ErrorResponse<'a>,
    /// HTTP status code of the response.
    pub status: u16,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const ACCESS_TOKEN: Self = Self::new(
        "access_token",
        "Invalid or expired access token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const ACCESS_TOKEN_NOT_FOUND: Self = Self::new(
        "access_token_not_found",
        "Missing access token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const AUTHENTICATION_FAILED: Self = Self::new(
        "authentication_failed",
        "Authentication failed.",
        StatusCode::UNAUTHORIZED,
    );
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict.", StatusCode::CONFLICT);
    // 5xx Server Errors
    pub const CREATE_ERROR: Self = Self::new(
        "create_error",
        "Failed to create the record.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const DELETE_ERROR: Self = Self::new(
        "delete_error",
        "Failed to delete the record.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const FETCH_ERROR: Self = Self::new(
        "fetch_error",
        "Failed to fetch records.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const LOGOUT_ERROR: Self = Self::new(
        "logout_error",
        "Failed to log out.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MISSING_CREDENTIALS: Self = Self::new(
        "missing_credentials",
        "Database, login and password are required.",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_FIELD: Self = Self::new(
        "missing_field",
        "A required field is missing.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const SERVER_ERROR: Self = Self::new(
        "server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const UPDATE_ERROR: Self = Self::new(
        "update_error",
        "Failed to update the record.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "Validation failed.",
        StatusCode::BAD_REQUEST,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(code: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the resource. An existing resource is merged with a `/`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Attaches context. Existing context is merged with a `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }

    /// Wraps the response in the failure envelope.
    pub fn into_envelope(self) -> ErrorEnvelope<'a> {
        ErrorEnvelope {
            success: false,
            status: self.status.as_u16(),
            error: self,
        }
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                target: TRACING_TARGET,
                status = %self.status,
                code = %self.code,
                message = %self.message,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::warn!(
                target: TRACING_TARGET,
                status = %self.status,
                code = %self.code,
                message = %self.message,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        }

        let status = self.status;
        (status, Json(self.into_envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_merging_resource() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("appointment")
            .with_resource("prescription");

        assert_eq!(
            response.resource.as_deref(),
            Some("appointment/prescription")
        );
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::FETCH_ERROR
            .with_context("connection reset")
            .with_context("patients");

        assert_eq!(
            response.context.as_deref(),
            Some("connection reset; patients")
        );
    }

    #[test]
    fn envelope_shape() {
        let envelope = ErrorResponse::NOT_FOUND
            .with_message("Patient not found")
            .with_context("patient_id: 4")
            .into_envelope();

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": { "code": "not_found", "message": "Patient not found" },
                "status": 404,
            })
        );
    }

    #[test]
    fn context_is_never_serialized() {
        let response = ErrorResponse::SERVER_ERROR
            .with_resource("patient")
            .with_context("duplicate key value violates unique constraint");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("resource"));
        assert!(!json.contains("context"));
        assert!(!json.contains("duplicate key"));
    }
}
