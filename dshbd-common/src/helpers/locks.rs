use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// A table of async mutexes addressed by key.
///
/// Tasks locking the same key run one at a time; different keys never block
/// each other. Entries are only weakly held by the table and are pruned once
/// nobody holds or waits on them.
pub struct KeyedLocks<K> {
    locks: std::sync::Mutex<HashMap<K, Weak<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    pub async fn lock(&self, key: &K) -> OwnedMutexGuard<()> {
        let lock = {
            #[allow(clippy::unwrap_used, reason = "panic on poison")]
            let mut locks = self.locks.lock().unwrap();
            locks.retain(|_, lock| lock.strong_count() > 0);
            match locks.get(key).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    let lock = Arc::new(Mutex::new(()));
                    locks.insert(key.clone(), Arc::downgrade(&lock));
                    lock
                }
            }
        };
        lock.lock_owned().await
    }

    /// Number of keys currently held or waited on
    pub fn active_keys(&self) -> usize {
        #[allow(clippy::unwrap_used, reason = "panic on poison")]
        let locks = self.locks.lock().unwrap();
        locks.values().filter(|lock| lock.strong_count() > 0).count()
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}
