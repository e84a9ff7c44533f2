//! HTTP error type with a builder for per-request messages.
//!
//! Every handler returns [`Result`]. The [`ErrorKind`] decides the `code`
//! and status of the response envelope; the optional message replaces the
//! kind's default text, and the context is logged but never sent.

use std::borrow::Cow;
use std::fmt;

use aide::OperationOutput;
use aide::generate::GenContext;
use aide::openapi::{Operation, Response as ApiResponse};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::{ErrorEnvelope, ErrorResponse};

/// The error type for HTTP handlers.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches internal context. Logged with the response, never serialized.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Sets the message shown to the caller.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Builds the response body without sending it.
    pub fn to_response(&self) -> ErrorResponse<'static> {
        let mut response = self.kind.response();

        if let Some(ref message) = self.message {
            response = response.with_message(message.clone().into_owned());
        }

        if let Some(ref resource) = self.resource {
            response = response.with_resource(resource.clone().into_owned());
        }

        if let Some(ref context) = self.context {
            response = response.with_context(context.clone().into_owned());
        }

        response
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("code", &response.code)
            .field("status", &response.status)
            .field("message", &response.message);

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        if let Some(ref message) = self.message {
            debug_struct.field("custom_message", message);
        }

        if let Some(ref resource) = self.resource {
            debug_struct.field("custom_resource", resource);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.code, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {}]", resource)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl OperationOutput for Error<'_> {
    type Inner = ErrorEnvelope<'static>;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        axum::Json::<ErrorEnvelope<'static>>::operation_response(ctx, operation)
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every error code the API answers with.
///
/// The snake_case name of each variant is the `error.code` of the envelope.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 - login called without `db`, `login` or `password`
    MissingCredentials,
    /// 401 - credentials did not match an active account
    AuthenticationFailed,
    /// 401 - no `access_token` header
    AccessTokenNotFound,
    /// 401 - unknown, expired or under-scoped token
    AccessToken,
    /// 404 - record does not exist
    NotFound,
    /// 400 - required body field missing
    MissingField,
    /// 400 - domain rule broken
    ValidationError,
    /// 400 - malformed request
    BadRequest,
    /// 409 - duplicate record
    Conflict,

    // 5xx Server Errors
    /// 500 - reading records failed
    FetchError,
    /// 500 - creating a record failed
    CreateError,
    /// 500 - updating a record failed
    UpdateError,
    /// 500 - deleting a record failed
    DeleteError,
    /// 500 - deleting the caller's token failed
    LogoutError,
    /// 500 - anything unexpected
    #[default]
    ServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns whether the kind reports a server side failure.
    #[inline]
    pub fn is_server_error(self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns the default response of this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::MissingCredentials => ErrorResponse::MISSING_CREDENTIALS,
            Self::AuthenticationFailed => ErrorResponse::AUTHENTICATION_FAILED,
            Self::AccessTokenNotFound => ErrorResponse::ACCESS_TOKEN_NOT_FOUND,
            Self::AccessToken => ErrorResponse::ACCESS_TOKEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::MissingField => ErrorResponse::MISSING_FIELD,
            Self::ValidationError => ErrorResponse::VALIDATION_ERROR,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::FetchError => ErrorResponse::FETCH_ERROR,
            Self::CreateError => ErrorResponse::CREATE_ERROR,
            Self::UpdateError => ErrorResponse::UPDATE_ERROR,
            Self::DeleteError => ErrorResponse::DELETE_ERROR,
            Self::LogoutError => ErrorResponse::LOGOUT_ERROR,
            Self::ServerError => ErrorResponse::SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().code.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 15] = [
        ErrorKind::MissingCredentials,
        ErrorKind::AuthenticationFailed,
        ErrorKind::AccessTokenNotFound,
        ErrorKind::AccessToken,
        ErrorKind::NotFound,
        ErrorKind::MissingField,
        ErrorKind::ValidationError,
        ErrorKind::BadRequest,
        ErrorKind::Conflict,
        ErrorKind::FetchError,
        ErrorKind::CreateError,
        ErrorKind::UpdateError,
        ErrorKind::DeleteError,
        ErrorKind::LogoutError,
        ErrorKind::ServerError,
    ];

    #[test]
    fn default_is_server_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::ServerError);
        assert_eq!(error.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Patient not found")
            .with_resource("patient")
            .with_context("patient_id: 12");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Patient not found"));
        assert_eq!(error.resource(), Some("patient"));
        assert_eq!(error.context(), Some("patient_id: 12"));
    }

    #[test]
    fn message_replaces_the_default() {
        let response = ErrorKind::NotFound
            .with_message("Appointment not found")
            .to_response();
        assert_eq!(response.message, "Appointment not found");

        let response = ErrorKind::NotFound.into_error().to_response();
        assert_eq!(response.message, "Resource not found.");
    }

    #[test]
    fn auth_kinds_are_unauthorized() {
        for kind in [
            ErrorKind::AuthenticationFailed,
            ErrorKind::AccessTokenNotFound,
            ErrorKind::AccessToken,
        ] {
            assert_eq!(kind.status_code(), StatusCode::UNAUTHORIZED);
        }

        assert_eq!(
            ErrorKind::MissingCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(ErrorKind::AccessTokenNotFound.to_string(), "access_token_not_found");
        assert_eq!(ErrorKind::AccessToken.to_string(), "access_token");
        assert_eq!(ErrorKind::FetchError.to_string(), "fetch_error");
        assert_eq!(ErrorKind::ServerError.to_string(), "server_error");
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Patient not found")
            .with_resource("patient")
            .with_context("ID: 123");

        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Patient not found"));
        assert!(display.contains("ID: 123"));
        assert!(display.contains("patient"));
    }

    #[test]
    fn std_fmt_debug() {
        let error = ErrorKind::AccessToken.with_message("Token expired");
        let debug = format!("{:?}", error);
        assert!(debug.contains("AccessToken"));
        assert!(debug.contains("Token expired"));
    }

    #[test]
    fn std_error_trait() {
        let error = Error::new(ErrorKind::BadRequest);
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn all_error_kinds_have_responses() {
        for kind in ALL_KINDS {
            let response = kind.response();
            assert!(!response.code.is_empty());
            assert!(response.status.as_u16() >= 400);
            let _ = kind.into_response();
        }
    }
}
