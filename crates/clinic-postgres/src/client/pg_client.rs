use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use deadpool::managed::{Hook, Pool};
use derive_more::{Deref, DerefMut};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool_hooks;
use crate::{
    ConnectionPool, PgConfig, PgError, PgResult, PooledConnection, TRACING_TARGET_CONNECTION,
};

/// Snapshot of the connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PgPoolStatus {
    /// Maximum number of connections in the pool.
    pub max_size: usize,
    /// Current number of connections in the pool.
    pub size: usize,
    /// Number of idle connections.
    pub available: usize,
    /// Number of callers waiting for a connection.
    pub waiting: usize,
}

/// Pooled database client shared by every request.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Creates the pool without touching the database.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CONNECTION,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(pool_hooks::setup_callback);
        let manager =
            AsyncDieselConnectionManager::new_with_config(&config.postgres_url, manager_config);

        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(config.connection_timeout())
            .create_timeout(config.connection_timeout())
            .recycle_timeout(config.idle_timeout())
            .runtime(deadpool::Runtime::Tokio1)
            .post_create(Hook::sync_fn(pool_hooks::post_create))
            .post_recycle(Hook::sync_fn(pool_hooks::post_recycle))
            .build()
            .map_err(|e| {
                tracing::error!(target: TRACING_TARGET_CONNECTION, error = %e, "Failed to create connection pool");
                PgError::Unexpected(format!("Failed to build connection pool: {e}").into())
            })?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            max_connections = config.postgres_max_connections,
            "Database client initialized"
        );

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Creates the pool and runs `SELECT 1` to prove the database is reachable.
    pub async fn new_with_test(config: PgConfig) -> PgResult<Self> {
        #[derive(diesel::QueryableByName)]
        struct Probe {
            #[diesel(sql_type = diesel::sql_types::Integer)]
            #[allow(dead_code)]
            result: i32,
        }

        let this = Self::new(config)?;
        let mut conn = this.get_connection().await?;
        let _: Probe = diesel::sql_query("SELECT 1 AS result")
            .get_result(&mut **conn)
            .await
            .map_err(|e| {
                tracing::error!(target: TRACING_TARGET_CONNECTION, error = %e, "Database connectivity probe failed");
                PgError::from(e)
            })?;

        Ok(this)
    }

    /// Checks a connection out of the pool.
    ///
    /// Waits up to the configured connection timeout.
    pub async fn get_connection(&self) -> PgResult<PgConn> {
        let start = Instant::now();
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                elapsed = ?start.elapsed(),
                "Failed to acquire connection from pool"
            );
            PgError::from(e)
        })?;

        let elapsed = start.elapsed();
        if elapsed > Duration::from_millis(100) {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                "Connection acquisition took longer than expected"
            );
        }

        Ok(PgConn::new(conn))
    }

    /// Returns the current pool statistics.
    #[inline]
    pub fn pool_status(&self) -> PgPoolStatus {
        let status = self.inner.pool.status();
        PgPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }

    #[inline]
    pub fn config(&self) -> &PgConfig {
        &self.inner.config
    }
}

impl fmt::Debug for PgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.pool_status();
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("pool_max_size", &status.max_size)
            .field("pool_size", &status.size)
            .field("pool_available", &status.available)
            .finish()
    }
}

/// A connection checked out of the pool.
///
/// Derefs to the pooled [`AsyncPgConnection`], so every repository trait in
/// [`query`] is callable on it. The connection returns to the pool on drop.
///
/// ```ignore
/// let mut conn = pg_client.get_connection().await?;
/// let patient = conn.find_patient_by_id(patient_id).await?;
/// ```
///
/// [`AsyncPgConnection`]: crate::PgConnection
/// [`query`]: crate::query
#[derive(Deref, DerefMut)]
pub struct PgConn {
    #[deref]
    #[deref_mut]
    conn: PooledConnection,
}

impl PgConn {
    pub fn new(conn: PooledConnection) -> Self {
        Self { conn }
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok` and rolls back otherwise.
    ///
    /// ```ignore
    /// conn.transaction(|conn| {
    ///     Box::pin(async move {
    ///         let appointment = conn.find_appointment_for_update(id).await?;
    ///         // ...
    ///         Ok::<_, PgError>(appointment)
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn transaction<'a, T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: for<'r> FnOnce(&'r mut PooledConnection) -> ScopedBoxFuture<'a, 'r, Result<T, E>>
            + Send
            + 'a,
        T: Send + 'a,
        E: From<diesel::result::Error> + Send + 'a,
    {
        self.conn.transaction(f).await
    }

    /// Unwraps the pooled connection.
    pub(crate) fn into_inner(self) -> PooledConnection {
        self.conn
    }
}

impl fmt::Debug for PgConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConn").finish_non_exhaustive()
    }
}
