//! Redis mutex provider implementation.

use distmutex_core::error::{LockError, LockResult};
use distmutex_core::request::LockRequest;
use distmutex_core::traits::LockProvider;
use fred::prelude::*;
use fred::types::CustomCommand;
use tracing::{debug, instrument};

/// Lua script to release the lock.
///
/// GET and DEL must run as one server-side unit: a plain read-then-delete
/// would race against a holder whose lease expires between the two steps.
const RELEASE_SCRIPT_LUA: &str = r#"
    if redis.call('get', KEYS[1]) == ARGV[1] then
        return redis.call('del', KEYS[1])
    end
    return 0
"#;

/// Builder for Redis mutex provider configuration.
pub struct RedisMutexProviderBuilder {
    url: Option<String>,
    client: Option<RedisClient>,
}

impl RedisMutexProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            client: None,
        }
    }

    /// Sets the Redis server URL; the provider connects during `build`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Uses an existing, caller-owned Redis client.
    pub fn client(mut self, client: RedisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the provider, connecting first when a URL was given.
    pub async fn build(self) -> LockResult<RedisMutexProvider> {
        if let Some(client) = self.client {
            return Ok(RedisMutexProvider { client });
        }

        let url = self
            .url
            .ok_or_else(|| LockError::initialization("no Redis client or URL provided"))?;

        let config = RedisConfig::from_url(&url)
            .map_err(|e| LockError::initialization(format!("invalid Redis URL: {}", e)))?;

        let client = RedisClient::new(config, None, None, None);
        client.connect();
        client
            .wait_for_connect()
            .await
            .map_err(|e| LockError::initialization(format!("failed to connect to Redis: {}", e)))?;

        Ok(RedisMutexProvider { client })
    }
}

impl Default for RedisMutexProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider for Redis-backed mutexes.
///
/// Holds a single multiplexed client; every lock/unlock is one round trip
/// and no connection state spans calls. Expiry is delegated entirely to the
/// store's native TTL mechanism, so the provider runs no timers and no
/// background sweeping.
pub struct RedisMutexProvider {
    client: RedisClient,
}

impl RedisMutexProvider {
    /// Returns a new builder for configuring the provider.
    pub fn builder() -> RedisMutexProviderBuilder {
        RedisMutexProviderBuilder::new()
    }

    /// Creates a provider over an existing, caller-owned client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Creates a provider by connecting to the specified Redis URL.
    pub async fn connect(url: impl Into<String>) -> LockResult<Self> {
        Self::builder().url(url).build().await
    }
}

impl LockProvider for RedisMutexProvider {
    fn name(&self) -> &'static str {
        "redis"
    }

    #[instrument(skip(self, request), fields(backend = "redis", lock.key = %request.key()))]
    async fn lock(&self, request: &LockRequest) -> LockResult<()> {
        // A zero lease means no TTL: the expiration argument is omitted
        // entirely and the key lives until an explicit unlock.
        let expiry = if request.lease().is_zero() {
            None
        } else {
            Some(Expiration::PX(request.lease().as_millis() as i64))
        };

        // SET key owner PX milliseconds NX: set only if the key does not
        // already exist. Returns OK when set, nil when the key is present.
        let result: Option<String> = self
            .client
            .set(
                request.key(),
                request.owner(),
                expiry,
                Some(SetOptions::NX),
                false,
            )
            .await
            .map_err(|e| LockError::backend("redis SET", e))?;

        if result.is_some() {
            Ok(())
        } else {
            debug!(lock.key = %request.key(), "lock held by a live owner");
            Err(LockError::AlreadyLocked)
        }
    }

    #[instrument(skip(self, request), fields(backend = "redis", lock.key = %request.key()))]
    async fn unlock(&self, request: &LockRequest) -> LockResult<()> {
        let args: Vec<RedisValue> = vec![
            RELEASE_SCRIPT_LUA.into(),
            1_i64.into(), // numkeys
            request.key().into(),
            request.owner().into(),
        ];

        let cmd = CustomCommand::new_static("EVAL", None, false);

        let deleted: i64 = self
            .client
            .custom(cmd, args)
            .await
            .map_err(|e| LockError::backend("redis EVAL", e))?;

        if deleted == 0 {
            debug!(lock.key = %request.key(), "no live lock owned by caller");
            Err(LockError::NotLocked)
        } else {
            Ok(())
        }
    }
}
