//! JSON extractor with the clinic error envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{field_name_from_error, sanitize_error_message};
use crate::handler::{Error, ErrorKind};

/// Maximum accepted request body size in bytes (16MB).
///
/// Large enough for a base64 encoded attachment at its 10MB limit.
pub const MAX_JSON_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// JSON extractor and response wrapper.
///
/// A body missing a required field is answered with `400 missing_field` and
/// the message `Field 'name' is required`; any other malformed body with
/// `400 bad_request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let detail = err.body_text();

                if detail.contains("missing field")
                    && let Some(field) = field_name_from_error(&detail)
                {
                    return ErrorKind::MissingField
                        .with_message(format!("Field '{}' is required", field));
                }

                let detail = detail
                    .rsplit_once("target type: ")
                    .map_or(detail.as_str(), |(_, tail)| tail);

                ErrorKind::BadRequest
                    .with_message(format!(
                        "Invalid request data: {}",
                        sanitize_error_message(detail, 1, 200)
                    ))
            }
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(sanitize_error_message(&err.body_text(), 3, 200)),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Request must have Content-Type header set to 'application/json'"),
            JsonRejection::BytesRejection(err) => {
                let message = err.to_string();
                if message.contains("length limit") {
                    ErrorKind::BadRequest.with_message(format!(
                        "Request body exceeds the maximum size of {} bytes",
                        MAX_JSON_PAYLOAD_SIZE
                    ))
                } else {
                    ErrorKind::BadRequest
                        .with_message("Failed to read request body")
                        .with_context(sanitize_error_message(&message, 3, 200))
                }
            }
            other => ErrorKind::ServerError
                .with_message("Request processing failed")
                .with_context(format!("JSON rejection: {:?}", other)),
        }
    }
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_early_responses(ctx, operation)
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}
