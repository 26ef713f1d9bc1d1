use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::session::controller::Controller;

pub type SharedController = Arc<Mutex<Controller>>;

struct SessionEntry {
    controller: SharedController,
    last_used: u64,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<Uuid, SessionEntry>,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// In-memory map of browser sessions to their controllers.
/// Holds at most `capacity` sessions; the least recently used is evicted
/// when a new one would exceed it.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn create(&self) -> Uuid {
        let mut sessions = self.inner.lock().await;

        while sessions.entries.len() >= self.capacity {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.entries.remove(&id);
                    info!("Evicted session {id}");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let last_used = sessions.tick();
        sessions.entries.insert(
            id,
            SessionEntry {
                controller: Arc::new(Mutex::new(Controller::new())),
                last_used,
            },
        );
        id
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SharedController> {
        let mut sessions = self.inner.lock().await;
        let now = sessions.tick();
        let entry = sessions.entries.get_mut(&id)?;
        entry.last_used = now;
        Some(entry.controller.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(4);
        let id = store.create().await;
        assert!(store.get(id).await.is_some());
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new(4);
        let a = store.get(store.create().await).await.unwrap();
        let b = store.get(store.create().await).await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let store = SessionStore::new(2);
        let first = store.create().await;
        let second = store.create().await;

        // touching `first` makes `second` the eviction candidate
        store.get(first).await;
        let third = store.create().await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(first).await.is_some());
        assert!(store.get(second).await.is_none());
        assert!(store.get(third).await.is_some());
    }
}
