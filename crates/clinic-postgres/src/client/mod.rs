//! Pooled PostgreSQL client and startup migrations.

mod migrate;
mod pg_client;
mod pg_config;
mod pool_hooks;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use migrate::run_pending_migrations;
pub use pg_client::{PgClient, PgConn, PgPoolStatus};
pub use pg_config::PgConfig;

/// Connection pool used throughout the service.
pub type ConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// A connection checked out of the [`ConnectionPool`].
pub type PooledConnection = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
