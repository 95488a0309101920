//! Reusable lock protocol choreography, generic over any provider.
//!
//! Each backend's integration test constructs its provider and hands it to
//! [`run_basic_lock_tests`]; the suite itself only speaks the core API.

use distmutex_core::error::LockError;
use distmutex_core::mutex::{Mutex, MutexFactory, MutexOptions};
use distmutex_core::request::LockRequest;
use distmutex_core::traits::LockProvider;
use std::time::Duration;

/// Runs the full protocol choreography against one provider.
pub async fn run_basic_lock_tests<P: LockProvider>(provider: P) {
    let factory =
        MutexFactory::with_defaults(provider, MutexOptions::new().lease(Duration::from_secs(1)));

    let m = factory.create_with("johndoe", MutexOptions::new().namespace("questions"));
    assert_eq!(
        m.to_string(),
        format!("Mutex({}:questions:johndoe)", factory.provider().name())
    );

    lock_and_unlock_in_time(&m).await;
    unlock_after_an_expired_lock(&m).await;
    lock_contention(&m).await;

    let m1 = factory.create_with("apple", MutexOptions::new().lease(Duration::from_millis(10)));
    let m2 = factory.create_with("apple", MutexOptions::new().lease(Duration::from_millis(100)));
    unlock_after_owner_change(&m1, &m2).await;

    infinite_lease(&factory).await;
    forged_owner_cannot_unlock(&factory).await;
}

async fn lock_and_unlock_in_time<P: LockProvider>(m: &Mutex<P>) {
    m.lock().await.unwrap();
    m.unlock().await.unwrap();
}

async fn unlock_after_an_expired_lock<P: LockProvider>(m: &Mutex<P>) {
    m.lock().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await; // expired (released by the store)
    assert!(matches!(m.unlock().await, Err(LockError::NotLocked)));
}

async fn lock_contention<P: LockProvider>(m: &Mutex<P>) {
    m.lock().await.unwrap();
    // A second acquisition fails even for the holding owner.
    assert!(matches!(m.lock().await, Err(LockError::AlreadyLocked)));
    m.unlock().await.unwrap();
}

async fn unlock_after_owner_change<P: LockProvider>(m1: &Mutex<P>, m2: &Mutex<P>) {
    m1.lock().await.unwrap();
    assert!(matches!(m2.lock().await, Err(LockError::AlreadyLocked)));

    tokio::time::sleep(Duration::from_millis(20)).await; // m1 expired (released by the store)

    // m2 can take the lock over, after which m1 has no unlock authority.
    m2.lock().await.unwrap();
    assert!(matches!(m1.unlock().await, Err(LockError::NotLocked)));
    m2.unlock().await.unwrap();
}

async fn infinite_lease<P: LockProvider>(factory: &MutexFactory<P>) {
    let m = factory.create_with("banana", MutexOptions::new().lease(Duration::ZERO));
    let rival = factory.create_with("banana", MutexOptions::new().lease(Duration::from_millis(50)));

    m.lock().await.unwrap();
    assert!(matches!(rival.lock().await, Err(LockError::AlreadyLocked)));

    // A delay that expires every leased lock in this suite does not expire
    // a zero-lease lock.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(matches!(rival.lock().await, Err(LockError::AlreadyLocked)));

    m.unlock().await.unwrap();
    rival.lock().await.unwrap();
    rival.unlock().await.unwrap();
}

async fn forged_owner_cannot_unlock<P: LockProvider>(factory: &MutexFactory<P>) {
    let m = factory.create("pear");
    m.lock().await.unwrap();

    // Same key, different owner token: the store must refuse the release.
    let forged = LockRequest::new(m.key(), "forged-owner", m.lease());
    assert!(matches!(
        factory.provider().unlock(&forged).await,
        Err(LockError::NotLocked)
    ));

    m.unlock().await.unwrap();
}
