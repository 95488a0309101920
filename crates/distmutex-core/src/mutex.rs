//! Client-side mutex handle and factory.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::LockResult;
use crate::request::{generate_owner_token, LockRequest};
use crate::traits::LockProvider;

/// Namespace used when neither the factory nor the instance overrides it.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Per-mutex configuration, applied on top of factory defaults.
///
/// The builder-style equivalent of functional options: unset fields fall
/// back to the factory's defaults.
///
/// # Example
///
/// ```rust,ignore
/// let m = factory.create_with(
///     "johndoe",
///     MutexOptions::new()
///         .namespace("questions")
///         .lease(Duration::from_secs(1)),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MutexOptions {
    namespace: Option<String>,
    lease: Option<Duration>,
}

impl MutexOptions {
    /// Creates empty options; every field falls back to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace prefixed to the lock id.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the lease duration. [`Duration::ZERO`] means the lock never
    /// expires and must be released explicitly.
    pub fn lease(mut self, lease: Duration) -> Self {
        self.lease = Some(lease);
        self
    }

    fn merged_over(self, defaults: &MutexOptions) -> (String, Duration) {
        let namespace = self
            .namespace
            .or_else(|| defaults.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let lease = self.lease.or(defaults.lease).unwrap_or(Duration::ZERO);
        (namespace, lease)
    }
}

/// Builds [`Mutex`] instances that share one provider and default options.
///
/// # Example
///
/// ```rust,ignore
/// let factory = MutexFactory::with_defaults(
///     provider,
///     MutexOptions::new().lease(Duration::from_secs(30)),
/// );
/// let m = factory.create("reindex-job");
/// m.lock().await?;
/// ```
pub struct MutexFactory<P> {
    provider: Arc<P>,
    defaults: MutexOptions,
}

impl<P: LockProvider> MutexFactory<P> {
    /// Creates a factory with the built-in defaults: namespace
    /// [`DEFAULT_NAMESPACE`], lease zero (never expires).
    pub fn new(provider: P) -> Self {
        Self::with_defaults(provider, MutexOptions::new())
    }

    /// Creates a factory with explicit default options.
    pub fn with_defaults(provider: P, defaults: MutexOptions) -> Self {
        Self {
            provider: Arc::new(provider),
            defaults,
        }
    }

    /// The provider shared by every mutex this factory builds.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Creates a mutex for `id` using the factory defaults.
    pub fn create(&self, id: &str) -> Mutex<P> {
        self.create_with(id, MutexOptions::new())
    }

    /// Creates a mutex for `id`; `options` override the factory defaults.
    ///
    /// Every call generates a fresh owner token, so two mutexes created for
    /// the same id are always distinguishable holders.
    pub fn create_with(&self, id: &str, options: MutexOptions) -> Mutex<P> {
        let (namespace, lease) = options.merged_over(&self.defaults);
        let key = format!("{}:{}", namespace, id);
        Mutex {
            request: LockRequest::new(key, generate_owner_token(), lease),
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> Clone for MutexFactory<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            defaults: self.defaults.clone(),
        }
    }
}

/// A handle to one named distributed lock.
///
/// Binds a lock key, a stable owner token and a lease duration to a
/// provider. The owner token is fixed at construction and reused across
/// repeated [`lock`](Mutex::lock)/[`unlock`](Mutex::unlock) cycles; the
/// mutex itself holds no locking state beyond what the store persists.
pub struct Mutex<P> {
    request: LockRequest,
    provider: Arc<P>,
}

impl<P: LockProvider> Mutex<P> {
    /// Acquires the lock: one atomic round trip to the store.
    ///
    /// Fails with [`LockError::AlreadyLocked`](crate::LockError::AlreadyLocked)
    /// while any non-expired holder exists.
    pub async fn lock(&self) -> LockResult<()> {
        self.provider.lock(&self.request).await
    }

    /// Releases the lock if this mutex still legitimately holds it.
    ///
    /// Fails with [`LockError::NotLocked`](crate::LockError::NotLocked) when
    /// the record is absent, owned by another token, or past its lease.
    pub async fn unlock(&self) -> LockResult<()> {
        self.provider.unlock(&self.request).await
    }

    /// The fully-qualified lock id, `"<namespace>:<id>"`.
    pub fn key(&self) -> &str {
        self.request.key()
    }

    /// This mutex's owner token.
    pub fn owner(&self) -> &str {
        self.request.owner()
    }

    /// The lease applied to every acquisition by this mutex.
    pub fn lease(&self) -> Duration {
        self.request.lease()
    }
}

impl<P: LockProvider> fmt::Display for Mutex<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mutex({}:{})", self.provider.name(), self.request.key())
    }
}

// Manual impl keeps `P: Debug` out of the bounds.
impl<P> fmt::Debug for Mutex<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex")
            .field("key", &self.request.key())
            .field("owner", &self.request.owner())
            .field("lease", &self.request.lease())
            .finish()
    }
}
