//! Example: MySQL-backed distributed mutex
//!
//! Run with: `cargo run --example mysql_mutex`
//!
//! Requires a MySQL server. Set the MYSQL_URL environment variable
//! or modify the URL below.

use distmutex_core::prelude::*;
use distmutex_mysql::MySqlMutexProvider;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mysql_url =
        std::env::var("MYSQL_URL").unwrap_or_else(|_| "mysql://root@localhost:3306/test".to_string());

    println!("Connecting to MySQL...");
    let provider = MySqlMutexProvider::builder()
        .connection_string(mysql_url)
        .table("demo_locks")
        .build()
        .await?;

    let factory = MutexFactory::with_defaults(
        provider,
        MutexOptions::new().lease(Duration::from_millis(800)),
    );

    let m = factory.create_with("nightly-report", MutexOptions::new().namespace("jobs"));
    println!("Acquiring {}...", m);
    m.lock().await?;
    println!("Lock acquired");

    // Outlive the lease: the row stays in the table but loses authority.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    match m.unlock().await {
        Err(LockError::NotLocked) => println!("Lease elapsed: unlock refused"),
        other => other?,
    }

    // The expired row is logically free; the next acquisition displaces it.
    m.lock().await?;
    println!("Reacquired after expiry");
    m.unlock().await?;
    println!("Lock released");

    Ok(())
}
