//! PostgreSQL mutex provider implementation.

use distmutex_core::error::{LockError, LockResult};
use distmutex_core::request::{now_nanos, LockRequest};
use distmutex_core::traits::LockProvider;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::connection::PostgresConnection;

/// Default lock table name.
pub const DEFAULT_TABLE: &str = "distmutex_locks";

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS {table} (
    id        VARCHAR(255) PRIMARY KEY,
    owner     VARCHAR(255) NOT NULL DEFAULT '',
    expire_at BIGINT NOT NULL DEFAULT 0
)";

// The DO UPDATE .. WHERE guard keeps a live row's owner/expire_at
// untouched; expire_at = 0 marks a lock that never expires and must never
// yield to a competitor. When the guard excludes the row, the statement
// reports zero affected rows.
const LOCK_SQL: &str = "\
INSERT INTO {table} AS t (id, owner, expire_at) VALUES ($1, $2, $3)
ON CONFLICT (id) DO UPDATE SET owner = EXCLUDED.owner, expire_at = EXCLUDED.expire_at
WHERE t.expire_at <> 0 AND t.expire_at < $4";

const UNLOCK_SQL: &str = "\
DELETE FROM {table} WHERE id = $1 AND owner = $2 AND (expire_at = 0 OR expire_at >= $3)";

/// Interpolates the table name into a statement template.
///
/// Everything else in the statements is a bound parameter; the table name
/// is the only text ever formatted in, and it is validated first.
fn render_sql(template: &str, table: &str) -> String {
    template.replace("{table}", table)
}

/// Accepts `[A-Za-z0-9_]` plus `.` for schema-qualified names.
fn validate_table_name(table: &str) -> LockResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(LockError::initialization(format!(
            "invalid lock table name: {:?}",
            table
        )))
    }
}

/// Builder for PostgreSQL mutex provider configuration.
pub struct PostgresMutexProviderBuilder {
    connection: Option<PostgresConnection>,
    table: String,
}

impl PostgresMutexProviderBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            connection: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Sets the PostgreSQL connection string.
    pub fn connection_string(mut self, conn_str: impl Into<String>) -> Self {
        self.connection = Some(PostgresConnection::ConnectionString(conn_str.into()));
        self
    }

    /// Sets an existing, caller-owned connection pool.
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.connection = Some(PostgresConnection::Pool(pool));
        self
    }

    /// Sets the lock table name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Builds the provider, ensuring the lock table exists.
    ///
    /// Fails with `Initialization` when the table name is invalid, the pool
    /// cannot be created, or the schema cannot be ensured; no partially
    /// usable provider is returned.
    pub async fn build(self) -> LockResult<PostgresMutexProvider> {
        let connection = self.connection.ok_or_else(|| {
            LockError::initialization("no PostgreSQL pool or connection string provided")
        })?;

        validate_table_name(&self.table)?;

        let pool = connection
            .get_pool()
            .await
            .map_err(LockError::initialization)?;

        sqlx::query(&render_sql(CREATE_TABLE_SQL, &self.table))
            .execute(&pool)
            .await
            .map_err(LockError::initialization)?;

        Ok(PostgresMutexProvider {
            pool,
            lock_sql: render_sql(LOCK_SQL, &self.table),
            unlock_sql: render_sql(UNLOCK_SQL, &self.table),
        })
    }
}

impl Default for PostgresMutexProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider for PostgreSQL-backed mutexes.
///
/// Holds a connection pool and the statement text rendered once at
/// construction. Connections are checked out of the pool for the duration
/// of a single statement only; nothing spans a lock/unlock boundary.
pub struct PostgresMutexProvider {
    pool: PgPool,
    lock_sql: String,
    unlock_sql: String,
}

impl PostgresMutexProvider {
    /// Returns a new builder for configuring the provider.
    pub fn builder() -> PostgresMutexProviderBuilder {
        PostgresMutexProviderBuilder::new()
    }

    /// Creates a provider over an existing pool and the given lock table.
    pub async fn new(pool: PgPool, table: impl Into<String>) -> LockResult<Self> {
        Self::builder().pool(pool).table(table).build().await
    }
}

impl LockProvider for PostgresMutexProvider {
    fn name(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self, request), fields(backend = "postgres", lock.key = %request.key()))]
    async fn lock(&self, request: &LockRequest) -> LockResult<()> {
        let now = now_nanos();
        let expire_at = request.expire_at(now);

        let result = sqlx::query(&self.lock_sql)
            .bind(request.key())
            .bind(request.owner())
            .bind(expire_at)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| LockError::backend("postgres lock upsert", e))?;

        // Zero affected rows means the conditional branch did not apply:
        // the existing lock is still valid.
        if result.rows_affected() == 0 {
            debug!(lock.key = %request.key(), "lock held by a live owner");
            Err(LockError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    #[instrument(skip(self, request), fields(backend = "postgres", lock.key = %request.key()))]
    async fn unlock(&self, request: &LockRequest) -> LockResult<()> {
        let result = sqlx::query(&self.unlock_sql)
            .bind(request.key())
            .bind(request.owner())
            .bind(now_nanos())
            .execute(&self.pool)
            .await
            .map_err(|e| LockError::backend("postgres unlock delete", e))?;

        if result.rows_affected() == 0 {
            debug!(lock.key = %request.key(), "no live lock owned by caller");
            Err(LockError::NotLocked)
        } else {
            Ok(())
        }
    }
}
