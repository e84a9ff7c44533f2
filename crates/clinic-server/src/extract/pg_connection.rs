//! Connection pool extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use clinic_postgres::{PgClient, PgConn};
use derive_more::{Deref, DerefMut};

use crate::handler::{Error, ErrorKind};

/// A connection checked out of the pool for the duration of the request.
///
/// Every repository trait of `clinic_postgres::query` is callable on it.
///
/// ```rust,ignore
/// async fn get_patient(PgPool(mut conn): PgPool) -> Result<()> {
///     let patient = conn.find_patient_by_id(4).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Deref, DerefMut)]
pub struct PgPool(pub PgConn);

impl<S> FromRequestParts<S> for PgPool
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pg_client = PgClient::from_ref(state);
        let conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire database connection");
            ErrorKind::ServerError
                .with_message("Database connection unavailable")
                .with_context(e.to_string())
        })?;

        Ok(PgPool(conn))
    }
}

impl aide::OperationInput for PgPool {}
