//! PostgreSQL connection management for distributed mutexes.

use sqlx::{PgPool, Pool, Postgres};
use std::fmt;

/// Represents different ways to connect to PostgreSQL.
#[derive(Clone)]
pub enum PostgresConnection {
    /// Connect using a connection string.
    ConnectionString(String),
    /// Use an existing, caller-owned connection pool.
    Pool(Pool<Postgres>),
}

impl PostgresConnection {
    /// Get or create a connection pool.
    ///
    /// For the `ConnectionString` variant, creates a new pool.
    /// For the `Pool` variant, clones the existing pool handle.
    pub async fn get_pool(&self) -> Result<Pool<Postgres>, sqlx::Error> {
        match self {
            PostgresConnection::ConnectionString(url) => PgPool::connect(url).await,
            PostgresConnection::Pool(pool) => Ok(pool.clone()),
        }
    }
}

impl fmt::Debug for PostgresConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostgresConnection::ConnectionString(_) => {
                write!(f, "PostgresConnection::ConnectionString([REDACTED])")
            }
            PostgresConnection::Pool(_) => write!(f, "PostgresConnection::Pool([POOL])"),
        }
    }
}
