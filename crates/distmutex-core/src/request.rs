//! Lock request data and owner token generation.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;

/// The `expire_at` sentinel for a lock that never expires.
pub const NO_EXPIRY: i64 = 0;

/// The fields a provider needs to execute one lock or unlock operation.
///
/// Immutable once constructed. A [`Mutex`](crate::mutex::Mutex) builds one
/// request at construction time and reuses it for every call, so repeated
/// lock/unlock cycles present the same owner identity to the store.
#[derive(Debug, Clone)]
pub struct LockRequest {
    key: String,
    owner: String,
    lease: Duration,
}

impl LockRequest {
    /// Creates a request with an explicit owner token.
    pub fn new(key: impl Into<String>, owner: impl Into<String>, lease: Duration) -> Self {
        Self {
            key: key.into(),
            owner: owner.into(),
            lease,
        }
    }

    /// The fully-qualified lock id, `"<namespace>:<id>"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The opaque token identifying this claim.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Lease duration; [`Duration::ZERO`] means the lock never expires.
    pub fn lease(&self) -> Duration {
        self.lease
    }

    /// Absolute expiry timestamp in nanoseconds for a lock taken at
    /// `now_nanos`, or [`NO_EXPIRY`] for a zero lease.
    pub fn expire_at(&self, now_nanos: i64) -> i64 {
        if self.lease.is_zero() {
            NO_EXPIRY
        } else {
            now_nanos + self.lease.as_nanos() as i64
        }
    }
}

/// Nanoseconds since the Unix epoch.
pub fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as i64
}

/// Generates a unique owner token.
///
/// Format: `{nanos}_{process_id}_{counter}_{random}`. The high-resolution
/// clock reading plus the per-process discriminators guarantee that two
/// tokens generated in rapid succession, in the same process or across
/// processes on one host, never collide.
pub fn generate_owner_token() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    let pid = process::id();
    let random: u64 = rand::thread_rng().gen();

    format!("{}_{}_{}_{:016x}", now_nanos(), pid, counter, random)
}
