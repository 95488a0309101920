//! Integration tests for the Redis mutex provider.

mod common;

use common::suite::run_basic_lock_tests;
use distmutex_core::error::LockError;
use distmutex_core::mutex::{MutexFactory, MutexOptions};
use distmutex_redis::RedisMutexProvider;
use fred::prelude::*;
use std::time::Duration;

/// Helper to get Redis URL from environment or use default.
fn get_redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_redis_basic_lock_protocol() {
    let provider = RedisMutexProvider::connect(get_redis_url()).await.unwrap();
    run_basic_lock_tests(provider).await;
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_redis_provider_over_caller_owned_client() {
    let config = RedisConfig::from_url(&get_redis_url()).unwrap();
    let client = RedisClient::new(config, None, None, None);
    client.connect();
    client.wait_for_connect().await.unwrap();

    let provider = RedisMutexProvider::new(client);
    let factory = MutexFactory::new(provider);

    let m = factory.create_with(
        "client-owned",
        MutexOptions::new().lease(Duration::from_secs(1)),
    );
    m.lock().await.unwrap();
    m.unlock().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_redis_lock_expires_via_store_ttl() {
    let provider = RedisMutexProvider::connect(get_redis_url()).await.unwrap();
    let factory = MutexFactory::new(provider);

    let m = factory.create_with("ttl", MutexOptions::new().lease(Duration::from_millis(50)));
    let rival = factory.create_with("ttl", MutexOptions::new().lease(Duration::from_secs(1)));

    m.lock().await.unwrap();
    assert!(matches!(rival.lock().await, Err(LockError::AlreadyLocked)));

    // The store evicts the key on its own; no client-side sweeping.
    tokio::time::sleep(Duration::from_millis(100)).await;
    rival.lock().await.unwrap();
    rival.unlock().await.unwrap();
}
