//! Example: Redis-backed distributed mutex
//!
//! Run with: `cargo run --example redis_mutex`
//!
//! Requires a Redis server. Set the REDIS_URL environment variable
//! or modify the URL below.

use distmutex_core::prelude::*;
use distmutex_redis::RedisMutexProvider;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    println!("Connecting to Redis...");
    let provider = RedisMutexProvider::connect(redis_url).await?;

    let factory = MutexFactory::with_defaults(
        provider,
        MutexOptions::new().lease(Duration::from_secs(5)),
    );

    let m = factory.create_with("report-rebuild", MutexOptions::new().namespace("jobs"));
    println!("Acquiring {}...", m);
    m.lock().await?;
    println!("Lock acquired");

    // A second mutex on the same id is a distinct holder and is denied.
    let rival = factory.create_with("report-rebuild", MutexOptions::new().namespace("jobs"));
    match rival.lock().await {
        Err(LockError::AlreadyLocked) => println!("Rival denied: already locked"),
        other => other?,
    }

    println!("Doing critical work...");
    tokio::time::sleep(Duration::from_millis(500)).await;

    m.unlock().await?;
    println!("Lock released");

    // With the lock released, the rival can take it.
    rival.lock().await?;
    println!("Rival acquired the lock after release");
    rival.unlock().await?;

    Ok(())
}
