//! MySQL backend for lease-based distributed mutexes.
//!
//! Locks are rows in a caller-named table. Acquisition is a single
//! conditional upsert executed under the engine's row-level concurrency
//! control; release is a single conditional delete fenced on the owner
//! token. An expired row is logically free and stays in place until the
//! next successful acquisition overwrites it.

pub mod connection;
pub mod provider;

pub use connection::MySqlConnection;
pub use provider::{MySqlMutexProvider, MySqlMutexProviderBuilder};
