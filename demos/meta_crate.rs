//! Example: Using the meta-crate (all backends)
//!
//! Run with: `cargo run --example meta_crate`
//!
//! This example shows how to use the meta-crate, which re-exports all
//! backend implementations behind one set of imports. Backends are tried
//! only when their connection URL is present in the environment.

use distmutex::*;
use std::time::Duration;

async fn round_trip<P: LockProvider>(provider: P) -> Result<(), LockError> {
    let factory = MutexFactory::with_defaults(
        provider,
        MutexOptions::new().lease(Duration::from_secs(5)),
    );

    let m = factory.create_with("example", MutexOptions::new().namespace("demo"));
    m.lock().await?;
    println!("{} acquired", m);
    m.unlock().await?;
    println!("{} released", m);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(redis_url) = std::env::var("REDIS_URL") {
        println!("=== Redis Backend ===");
        round_trip(RedisMutexProvider::connect(redis_url).await?).await?;
    }

    if let Ok(mysql_url) = std::env::var("MYSQL_URL") {
        println!("=== MySQL Backend ===");
        let provider = MySqlMutexProvider::builder()
            .connection_string(mysql_url)
            .build()
            .await?;
        round_trip(provider).await?;
    }

    if let Ok(postgres_url) = std::env::var("POSTGRES_URL") {
        println!("=== PostgreSQL Backend ===");
        let provider = PostgresMutexProvider::builder()
            .connection_string(postgres_url)
            .build()
            .await?;
        round_trip(provider).await?;
    }

    Ok(())
}
