use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Path parameter extractor with the clinic error envelope.
///
/// Record ids are integers, so the usual failure is a non-numeric segment
/// such as `/api/patients/abc`, answered with `400 bad_request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let error_message = err.to_string();

                ErrorKind::BadRequest
                    .with_message(describe_deserialization_error(&error_message))
                    .with_context(format!(
                        "Path parameter deserialization failed: {}",
                        sanitize_error_message(&error_message, 2, 150)
                    ))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::BadRequest
                .with_message("Required path parameter missing")
                .with_context(sanitize_error_message(&err.to_string(), 2, 150)),
            _ => ErrorKind::ServerError
                .with_message("Path processing failed")
                .with_context("Unexpected error during path parameter processing"),
        }
    }
}

fn describe_deserialization_error(error_message: &str) -> &'static str {
    let error_lower = error_message.to_lowercase();

    if error_lower.contains("invalid digit") || error_lower.contains("cannot parse") {
        "Record ids must be positive integers"
    } else if error_lower.contains("too large") || error_lower.contains("too small") {
        "Record id is out of range"
    } else {
        "Invalid path parameter format"
    }
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumPath::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_explained() {
        assert_eq!(
            describe_deserialization_error("Cannot parse `abc` to a `i64`"),
            "Record ids must be positive integers"
        );
        assert_eq!(
            describe_deserialization_error("something else"),
            "Invalid path parameter format"
        );
    }
}
