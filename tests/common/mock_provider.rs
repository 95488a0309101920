//! In-memory provider for exercising the lock protocol without a store.

use distmutex_core::error::{LockError, LockResult};
use distmutex_core::request::{now_nanos, LockRequest, NO_EXPIRY};
use distmutex_core::traits::LockProvider;
use std::collections::HashMap;
use std::sync::Mutex;

/// One store-resident lock record.
struct MockRecord {
    owner: String,
    expire_at: i64,
}

impl MockRecord {
    /// An expired record is logically free even while it still exists.
    fn is_live(&self, now: i64) -> bool {
        self.expire_at == NO_EXPIRY || self.expire_at >= now
    }
}

/// Mock provider implementing the full protocol semantics in memory:
/// conditional create with expiry, owner-fenced conditional delete, and
/// expired records that linger until the next successful acquisition.
pub struct MockProvider {
    records: Mutex<HashMap<String, MockRecord>>,
}

impl MockProvider {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LockProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn lock(&self, request: &LockRequest) -> LockResult<()> {
        let now = now_nanos();
        let mut records = self.records.lock().unwrap();

        if let Some(existing) = records.get(request.key()) {
            if existing.is_live(now) {
                return Err(LockError::AlreadyLocked);
            }
        }

        records.insert(
            request.key().to_string(),
            MockRecord {
                owner: request.owner().to_string(),
                expire_at: request.expire_at(now),
            },
        );
        Ok(())
    }

    async fn unlock(&self, request: &LockRequest) -> LockResult<()> {
        let now = now_nanos();
        let mut records = self.records.lock().unwrap();

        match records.get(request.key()) {
            Some(existing) if existing.owner == request.owner() && existing.is_live(now) => {
                records.remove(request.key());
                Ok(())
            }
            _ => Err(LockError::NotLocked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_mock_round_trip() {
        let provider = MockProvider::new();
        let request = LockRequest::new("default:job", "owner-1", Duration::ZERO);

        provider.lock(&request).await.unwrap();
        provider.unlock(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_expired_record_is_free() {
        let provider = MockProvider::new();
        let first = LockRequest::new("default:job", "owner-1", Duration::from_nanos(1));
        let second = LockRequest::new("default:job", "owner-2", Duration::from_secs(10));

        provider.lock(&first).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        // The stale record is displaced, and its old owner loses authority.
        provider.lock(&second).await.unwrap();
        assert!(matches!(
            provider.unlock(&first).await,
            Err(LockError::NotLocked)
        ));
    }
}
