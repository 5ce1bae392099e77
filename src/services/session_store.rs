// src/services/session_store.rs
// DOCUMENTATION: In-memory session storage with TTL
// PURPOSE: Holds checkout carts and auth sessions keyed by opaque tokens

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session entry with expiration
#[derive(Clone, Debug)]
struct SessionEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> SessionEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe TTL session store keyed by UUID tokens
/// Reads refresh the expiry so active sessions stay alive
pub struct SessionStore<T> {
    store: Arc<RwLock<HashMap<Uuid, SessionEntry<T>>>>,
    ttl: Duration,
}

impl<T: Clone> SessionStore<T> {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Create a session and return its token
    pub async fn create(&self, data: T) -> Uuid {
        let token = Uuid::new_v4();
        let mut store = self.store.write().await;
        store.insert(token, SessionEntry::new(data, self.ttl));
        log::debug!("Session created: {}", token);
        token
    }

    /// Fetch session data, sliding the expiry forward
    pub async fn get(&self, token: &Uuid) -> Option<T> {
        let mut store = self.store.write().await;

        match store.get_mut(token) {
            Some(entry) if !entry.is_expired() => {
                entry.expires_at = Instant::now() + self.ttl;
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Session expired: {}", token);
                store.remove(token);
                None
            }
            None => None,
        }
    }

    /// Replace the data under an existing or new token
    pub async fn set(&self, token: Uuid, data: T) {
        let mut store = self.store.write().await;
        store.insert(token, SessionEntry::new(data, self.ttl));
    }

    pub async fn remove(&self, token: &Uuid) {
        let mut store = self.store.write().await;
        if store.remove(token).is_some() {
            log::debug!("Session removed: {}", token);
        }
    }

    /// Drop expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Session cleanup: removed {} expired sessions ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    pub async fn active_count(&self) -> usize {
        let store = self.store.read().await;
        store.values().filter(|e| !e.is_expired()).count()
    }
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired sessions
pub fn start_cleanup_task<T: Clone + Send + Sync + 'static>(
    store: Arc<SessionStore<T>>,
    interval_seconds: u64,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            store.cleanup().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store: SessionStore<String> = SessionStore::new(60);
        let token = store.create("hello".to_string()).await;

        assert_eq!(store.get(&token).await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store: SessionStore<String> = SessionStore::new(60);
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_expiration() {
        let store: SessionStore<String> = SessionStore::new(1);
        let token = store.create("ephemeral".to_string()).await;

        assert!(store.get(&token).await.is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(store.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_data() {
        let store: SessionStore<i32> = SessionStore::new(60);
        let token = store.create(1).await;

        store.set(token, 2).await;

        assert_eq!(store.get(&token).await, Some(2));
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired() {
        let store: SessionStore<String> = SessionStore::new(1);
        store.create("a".to_string()).await;
        store.create("b".to_string()).await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        store.cleanup().await;
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove() {
        let store: SessionStore<String> = SessionStore::new(60);
        let token = store.create("gone".to_string()).await;

        store.remove(&token).await;

        assert!(store.get(&token).await.is_none());
    }
}
