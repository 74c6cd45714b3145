//! Кеш с TTL для слоя персистентности: явная абстракция
//! ключ -> (значение, отметка времени). Никакого глобального состояния —
//! чистое ядро генерации про этот кеш не знает.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, (V, Instant)>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Значение по ключу, если оно ещё не протухло.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), (value, Instant::now()));
    }

    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }

    /// Убирает протухшие записи; вызывается фоновой задачей.
    pub async fn purge_expired(&self) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        let purged = before - entries.len();
        if purged > 0 {
            debug!("purged {} expired cache entries", purged);
        }
    }
}
