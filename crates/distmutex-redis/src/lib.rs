//! Redis backend for lease-based distributed mutexes.
//!
//! Locks are single keys: value = owner token, TTL = lease. Acquisition is
//! one `SET .. NX PX` command; release is a server-side Lua script that
//! deletes the key only when its value still equals the caller's owner
//! token, so the compare and the delete are one atomic unit.

pub mod provider;

pub use provider::{RedisMutexProvider, RedisMutexProviderBuilder};
