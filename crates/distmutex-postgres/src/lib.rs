//! PostgreSQL backend for lease-based distributed mutexes.
//!
//! Structurally identical to the MySQL backend: locks are rows in a
//! caller-named table, acquired by a single conditional upsert and released
//! by a single owner-fenced delete. Only the SQL dialect differs.

pub mod connection;
pub mod provider;

pub use connection::PostgresConnection;
pub use provider::{PostgresMutexProvider, PostgresMutexProviderBuilder};
