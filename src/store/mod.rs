//! In-memory collections backed 1:1 by a storage key.
//!
//! Every mutation updates memory before returning, then hands the whole
//! collection to the [`KvAdapter`](crate::storage::KvAdapter) and bumps the
//! shared [`ChangeFeed`].

mod collection;
mod singleton;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

pub use collection::Collection;
pub use singleton::Singleton;

/// Monotonic revision counter observed by canvas editors.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|revision| *revision += 1);
    }

    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
