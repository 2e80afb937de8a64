use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::storage::KvAdapter;

use super::{read_lock, write_lock, ChangeFeed};

/// A single value persisted under one key. Absence always means "defaults".
pub struct Singleton<T> {
    key: &'static str,
    kv: KvAdapter,
    feed: ChangeFeed,
    value: RwLock<T>,
}

impl<T> Singleton<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub async fn load(kv: KvAdapter, key: &'static str, feed: ChangeFeed, default: T) -> Self {
        let value = kv.read(key, default).await;
        Self::with_value(kv, key, feed, value)
    }

    pub fn with_value(kv: KvAdapter, key: &'static str, feed: ChangeFeed, value: T) -> Self {
        Self {
            key,
            kv,
            feed,
            value: RwLock::new(value),
        }
    }

    pub fn get(&self) -> T {
        read_lock(&self.value).clone()
    }

    /// Read a projection without cloning the whole value.
    pub fn read<R>(&self, view: impl FnOnce(&T) -> R) -> R {
        view(&read_lock(&self.value))
    }

    /// Merge changes into the current value, persist, and return the result.
    pub fn update(&self, apply: impl FnOnce(&mut T)) -> T {
        let mut value = write_lock(&self.value);
        apply(&mut value);
        self.kv.write(self.key, &*value);
        self.feed.bump();
        value.clone()
    }

    pub fn set(&self, next: T) -> T {
        self.update(move |value| *value = next)
    }
}
