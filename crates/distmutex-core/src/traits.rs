//! The backend capability trait for distributed mutexes.

use std::future::Future;

use crate::error::LockResult;
use crate::request::LockRequest;

/// A backend-specific implementation of the atomic lock/unlock protocol.
///
/// Providers are stateless with respect to lock identity: they hold only
/// backend connectivity (a client or pool) and statement state, and execute
/// the protocol against whichever record the request addresses. All race
/// resolution is delegated to the store's own atomicity guarantee — each
/// call is exactly one round trip, and the compare-and-act sequence for a
/// given key is indivisible with respect to any concurrent attempt on that
/// same key.
///
/// # Example
///
/// ```rust,ignore
/// async fn guarded<P: LockProvider>(provider: &P, request: &LockRequest) -> LockResult<()> {
///     provider.lock(request).await?;
///     // Critical section - we hold the lock until unlock or lease expiry.
///     provider.unlock(request).await
/// }
/// ```
pub trait LockProvider: Send + Sync {
    /// Short backend identifier (e.g. `"redis"`), used in display names.
    fn name(&self) -> &'static str;

    /// Attempts to acquire the lock described by `request`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Lock record created (or a stale holder displaced)
    /// * `Err(LockError::AlreadyLocked)` - A non-expired holder exists,
    ///   regardless of whether it is this same owner or another
    /// * `Err(LockError::Backend)` - Transport or driver failure
    ///
    /// There is no internal waiting, retrying, or backoff; callers needing
    /// bounded waits wrap this externally.
    fn lock(&self, request: &LockRequest) -> impl Future<Output = LockResult<()>> + Send;

    /// Releases the lock described by `request` if, and only if, the store
    /// still holds a live record owned by `request.owner()`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Record removed
    /// * `Err(LockError::NotLocked)` - Record absent, owned by another
    ///   token, or already past its lease
    /// * `Err(LockError::Backend)` - Transport or driver failure
    fn unlock(&self, request: &LockRequest) -> impl Future<Output = LockResult<()>> + Send;
}
