//! Serial numbers drawn from named Postgres sequences.

use std::future::Future;

use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;

use crate::types::SequenceCode;
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY};

#[derive(diesel::QueryableByName)]
struct NextValue {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

/// Repository for the serial number sequences.
pub trait SequenceRepository {
    /// Draws the next formatted serial for `code`, e.g. `PAT00042`.
    ///
    /// Backed by `nextval`, so concurrent callers never get the same value.
    fn next_by_code(
        &mut self,
        code: SequenceCode,
    ) -> impl Future<Output = PgResult<String>> + Send;
}

impl SequenceRepository for PgConnection {
    async fn next_by_code(&mut self, code: SequenceCode) -> PgResult<String> {
        let next: NextValue = diesel::sql_query("SELECT nextval($1::regclass) AS value")
            .bind::<Text, _>(code.sequence_name())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let serial = code.format(next.value);
        tracing::trace!(target: TRACING_TARGET_QUERY, %code, %serial, "Drew next serial");
        Ok(serial)
    }
}
