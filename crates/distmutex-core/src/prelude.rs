//! Convenience prelude for distributed mutex types.

pub use crate::error::{LockError, LockResult};
pub use crate::mutex::{Mutex, MutexFactory, MutexOptions, DEFAULT_NAMESPACE};
pub use crate::request::{generate_owner_token, now_nanos, LockRequest, NO_EXPIRY};
pub use crate::traits::LockProvider;
