use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One lock per resource key.
///
/// Holders of the same key are serialised; different keys never block each other.
/// Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocks {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        self.lock_for(key).lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub(crate) fn lock_for(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.registry();
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
