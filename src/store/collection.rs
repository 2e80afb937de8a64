use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::{models::Record, storage::KvAdapter};

use super::{read_lock, write_lock, ChangeFeed};

/// A list-valued collection persisted under one key.
pub struct Collection<T> {
    key: &'static str,
    kv: KvAdapter,
    feed: ChangeFeed,
    items: RwLock<Vec<T>>,
}

impl<T> Collection<T>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    pub async fn load(kv: KvAdapter, key: &'static str, feed: ChangeFeed) -> Self {
        let items = kv.read(key, Vec::new()).await;
        Self::with_items(kv, key, feed, items)
    }

    pub fn with_items(kv: KvAdapter, key: &'static str, feed: ChangeFeed, items: Vec<T>) -> Self {
        Self {
            key,
            kv,
            feed,
            items: RwLock::new(items),
        }
    }

    pub fn all(&self) -> Vec<T> {
        read_lock(&self.items).clone()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        read_lock(&self.items)
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Append a fully built record.
    pub fn insert(&self, record: T) -> T {
        let mut items = write_lock(&self.items);
        items.push(record.clone());
        self.persist(&items);
        record
    }

    /// Replace the record with the same id. Unknown ids leave the collection unchanged.
    pub fn update(&self, record: T) -> bool {
        self.modify(&record.id().to_string(), move |slot| *slot = record)
    }

    /// Mutate the record `id` in place. Returns `false` when no such record exists.
    pub fn modify(&self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        let mut items = write_lock(&self.items);
        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        apply(slot);
        self.persist(&items);
        true
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut items = write_lock(&self.items);
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return false;
        }
        self.persist(&items);
        true
    }

    // Called with the write guard held so storage sees writes in memory order.
    fn persist(&self, items: &[T]) {
        self.kv.write(self.key, items);
        self.feed.bump();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        models::{Hypothesis, NewHypothesis},
        storage::MemoryBackend,
    };
    use chrono::Utc;

    fn hypothesis(id: &str, description: &str) -> Hypothesis {
        NewHypothesis {
            description: description.into(),
        }
        .into_record(id.into(), Utc::now())
    }

    async fn collection() -> (Arc<MemoryBackend>, Collection<Hypothesis>) {
        let backend = Arc::new(MemoryBackend::new());
        let kv = KvAdapter::new(backend.clone());
        let collection = Collection::load(kv, "hypotheses", ChangeFeed::new()).await;
        (backend, collection)
    }

    #[tokio::test]
    async fn update_of_unknown_id_changes_nothing() {
        let (backend, collection) = collection().await;
        collection.insert(hypothesis("h-1", "X"));

        assert!(!collection.update(hypothesis("ghost", "Y")));
        assert_eq!(collection.len(), 1);
        assert_eq!(backend.write_count("validatehub-hypotheses"), 1);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_noop() {
        let (backend, collection) = collection().await;
        collection.insert(hypothesis("h-1", "X"));

        assert!(!collection.delete("ghost"));
        assert!(collection.delete("h-1"));
        assert!(collection.get_by_id("h-1").is_none());
        assert_eq!(backend.write_count("validatehub-hypotheses"), 2);
    }

    #[tokio::test]
    async fn mutations_bump_the_feed() {
        let (_backend, collection) = collection().await;
        let feed = collection.feed.clone();
        let before = feed.revision();

        collection.insert(hypothesis("h-1", "X"));
        collection.modify("h-1", |h| h.description = "Z".into());

        assert_eq!(feed.revision(), before + 2);
        assert_eq!(collection.get_by_id("h-1").unwrap().description, "Z");
    }

    #[tokio::test]
    async fn reload_sees_persisted_items() {
        let (backend, collection) = collection().await;
        collection.insert(hypothesis("h-1", "X"));

        let reloaded: Collection<Hypothesis> =
            Collection::load(KvAdapter::new(backend), "hypotheses", ChangeFeed::new()).await;
        assert_eq!(reloaded.all(), collection.all());
    }
}
