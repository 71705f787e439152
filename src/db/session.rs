use tokio::sync::RwLock;

use super::{Cache, CacheKey};
use crate::{error::AppResult, models::CachedSession};

/// Storage for the single cached login
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> AppResult<Option<CachedSession>>;

    /// Stores the session; `ttl_secs` lets the backend expire it on its own
    async fn save(&self, session: &CachedSession, ttl_secs: u64) -> AppResult<()>;

    async fn clear(&self) -> AppResult<()>;
}

/// Session store backed by Redis
pub struct RedisSessionStore {
    cache: Cache,
}

impl RedisSessionStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self) -> AppResult<Option<CachedSession>> {
        self.cache.get_from_cache(&CacheKey::Session).await
    }

    async fn save(&self, session: &CachedSession, ttl_secs: u64) -> AppResult<()> {
        self.cache
            .set_in_cache(&CacheKey::Session, session, ttl_secs)
            .await
    }

    async fn clear(&self) -> AppResult<()> {
        self.cache.remove(&CacheKey::Session).await
    }
}

/// In-process session store, used when no Redis is configured
#[derive(Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<CachedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a session already present, e.g. one left over from a previous run
    pub fn with_session(session: CachedSession) -> Self {
        Self {
            slot: RwLock::new(Some(session)),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<CachedSession>> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, session: &CachedSession, _ttl_secs: u64) -> AppResult<()> {
        *self.slot.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserIdentity;

    fn session() -> CachedSession {
        CachedSession::new(UserIdentity {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            picture_url: None,
            subject_id: "42".to_string(),
        })
    }

    #[tokio::test]
    async fn test_memory_store_save_load_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let s = session();
        store.save(&s, 600).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(s));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_with_session() {
        let s = session();
        let store = MemorySessionStore::with_session(s.clone());
        assert_eq!(store.load().await.unwrap(), Some(s));
    }
}
