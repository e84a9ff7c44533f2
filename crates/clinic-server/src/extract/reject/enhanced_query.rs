use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::field_name_from_error;
use crate::handler::{Error, ErrorKind};

/// Query string extractor with the clinic error envelope.
///
/// ```rust,no_run
/// use clinic_server::extract::Query;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Listing {
///     limit: Option<u32>,
///     offset: Option<u32>,
/// }
///
/// // GET /api/patients?limit=20&offset=40
/// async fn list(Query(listing): Query<Listing>) {
///     let _ = (listing.limit, listing.offset);
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

fn enhance_query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: "clinic_server::extract::query",
        error = %rejection,
        "Query parameter parsing failed"
    );

    let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
        return ErrorKind::BadRequest.with_message("Invalid query parameters");
    };

    let error_message = err.to_string();
    let field_name = field_name_from_error(&error_message).map(str::to_owned);

    if error_message.contains("missing field") {
        ErrorKind::MissingField.with_message(format!(
            "Query parameter '{}' is required",
            field_name.as_deref().unwrap_or("unknown")
        ))
    } else if error_message.contains("duplicate field") {
        ErrorKind::BadRequest.with_message(format!(
            "Query parameter '{}' was provided more than once",
            field_name.as_deref().unwrap_or("unknown")
        ))
    } else {
        ErrorKind::BadRequest
            .with_message("Invalid query parameter value")
            .with_context(format!("Failed to parse query string: {}", error_message))
    }
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_creation() {
        let query = Query::new("limit=10".to_string());
        assert_eq!(query.into_inner(), "limit=10");
    }
}
