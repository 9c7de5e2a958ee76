use std::fmt;
use std::marker::PhantomData;

use seenbox_backend::{Backend, Connect};
use seenbox_core::{BackendLabel, DEFAULT_CAPACITY, Item, Key, RecencyCache};
use tracing::{Span, field, trace};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::metrics;

/// Novelty-check and save gateway in front of a slow backing store.
///
/// The store keeps the keys of the items it saved itself in a bounded
/// [`RecencyCache`]:
///
/// - [`is_saved`](Self::is_saved) answers from the cache when it can and asks
///   the backend otherwise. Backend answers, positive or negative, are never
///   cached.
/// - [`save`](Self::save) writes through to the backend and caches the key
///   only once the write succeeded.
///
/// The cache lock covers nothing but the cache itself, so concurrent callers
/// overlap freely on backend I/O. Concurrent saves of the same key are not
/// coalesced and may both reach the backend.
pub struct DeduplicatingStore<I, B> {
    backend: B,
    cache: RecencyCache,
    _item: PhantomData<fn(&I)>,
}

impl<I, B> DeduplicatingStore<I, B>
where
    I: Item + 'static,
    B: Backend<I>,
{
    /// Wraps an already connected backend with a cache of [`DEFAULT_CAPACITY`] keys.
    pub fn new(backend: B) -> Self {
        Self::with_capacity(backend, DEFAULT_CAPACITY)
    }

    /// Wraps an already connected backend with a cache of `capacity` keys.
    pub fn with_capacity(backend: B, capacity: usize) -> Self {
        Self {
            backend,
            cache: RecencyCache::with_capacity(capacity),
            _item: PhantomData,
        }
    }

    /// Validates `config`, connects the backend and returns a ready store
    /// with an empty cache.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ConfigError`] if a connection field is empty or the
    ///   cache capacity is zero
    /// - [`StoreError::ConnectionError`] if the backend cannot be built or the
    ///   initial handshake fails
    pub async fn init(config: &StoreConfig) -> Result<Self, StoreError>
    where
        B: Connect,
    {
        config.validate()?;
        let backend = B::connect(&config.connection())
            .await
            .map_err(StoreError::ConnectionError)?;
        trace!(backend = %backend.label(), "Backing store connected");
        Ok(Self::with_capacity(backend, config.cache_capacity))
    }

    /// Reports whether an item with `key` has been saved.
    ///
    /// Keys saved through this store answer `true` straight from the cache.
    /// Anything else costs one backend lookup: a found record answers `true`,
    /// a missing one `false`.
    ///
    /// # Errors
    ///
    /// [`StoreError::StoreQueryError`] if the backend lookup fails. The answer
    /// is then unknown and must not be read as "not saved".
    #[tracing::instrument(
        name = "seenbox.is_saved",
        level = "trace",
        skip_all,
        fields(key = %key, backend = %self.backend.label(), cache.status = field::Empty)
    )]
    pub async fn is_saved(&self, key: &Key) -> Result<bool, StoreError> {
        let label = self.backend.label();
        if self.cache.contains(key) {
            Span::current().record("cache.status", "hit");
            metrics::record_hit(label.as_str());
            return Ok(true);
        }

        Span::current().record("cache.status", "miss");
        metrics::record_miss(label.as_str());
        match self.backend.find_by_key(key).await {
            Ok(found) => {
                trace!(found = found.is_some(), "Backend lookup finished");
                Ok(found.is_some())
            }
            Err(source) => {
                metrics::record_query_error(label.as_str());
                Err(StoreError::StoreQueryError {
                    key: key.clone(),
                    source,
                })
            }
        }
    }

    /// Writes `item` to the backend and remembers its key.
    ///
    /// No existence check is made first; call [`is_saved`](Self::is_saved)
    /// beforehand to avoid duplicate records.
    ///
    /// # Errors
    ///
    /// [`StoreError::StoreWriteError`] if the backend write fails. The cache
    /// is not touched in that case, so the save can simply be retried.
    #[tracing::instrument(
        name = "seenbox.save",
        level = "trace",
        skip_all,
        fields(key = %item.key(), backend = %self.backend.label())
    )]
    pub async fn save(&self, item: &I) -> Result<(), StoreError> {
        let label = self.backend.label();
        if let Err(source) = self.backend.insert_one(item).await {
            metrics::record_write_error(label.as_str());
            return Err(StoreError::StoreWriteError {
                key: item.key().clone(),
                source,
            });
        }

        self.cache.add(item.key().clone());
        metrics::record_write(label.as_str(), self.cache.len());
        trace!("Item saved");
        Ok(())
    }

    /// Label of the wrapped backend.
    pub fn label(&self) -> BackendLabel {
        self.backend.label()
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The recency cache, for invariant checks in tests.
    #[cfg(feature = "test-helpers")]
    #[cfg_attr(docsrs, doc(cfg(feature = "test-helpers")))]
    pub fn cache(&self) -> &RecencyCache {
        &self.cache
    }
}

impl<I, B> fmt::Debug for DeduplicatingStore<I, B>
where
    I: Item + 'static,
    B: Backend<I>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeduplicatingStore")
            .field("backend", &self.backend.label())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use seenbox_backend::{BackendError, BackendResult, ConnectionConfig};
    use seenbox_core::Record;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MapBackend {
        records: Mutex<HashMap<Key, Record>>,
        lookups: AtomicUsize,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl Backend<Record> for MapBackend {
        async fn find_by_key(&self, key: &Key) -> BackendResult<Option<Record>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.lock().unwrap().get(key).cloned())
        }

        async fn insert_one(&self, item: &Record) -> BackendResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(BackendError::internal(io::Error::other("disk full")));
            }
            self.records
                .lock()
                .unwrap()
                .insert(item.key().clone(), item.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl Connect for MapBackend {
        async fn connect(config: &ConnectionConfig) -> BackendResult<Self> {
            if config.uri.starts_with("mem://") {
                Ok(Self::default())
            } else {
                Err(BackendError::connection(io::Error::other("unreachable")))
            }
        }
    }

    #[tokio::test]
    async fn test_saved_key_is_answered_from_cache() {
        let store = DeduplicatingStore::new(MapBackend::default());
        store.save(&Record::new("a")).await.unwrap();

        assert!(store.is_saved(&Key::new("a")).await.unwrap());
        assert_eq!(store.backend().lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_key_goes_to_backend() {
        let store = DeduplicatingStore::new(MapBackend::default());

        assert!(!store.is_saved(&Key::new("a")).await.unwrap());
        assert!(!store.is_saved(&Key::new("a")).await.unwrap());
        assert_eq!(store.backend().lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched() {
        let backend = MapBackend::default();
        backend.fail_writes.store(true, Ordering::SeqCst);
        let store = DeduplicatingStore::new(backend);

        let err = store.save(&Record::new("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::StoreWriteError { ref key, .. } if key.as_str() == "a"));
        assert!(err.to_string().contains("disk full"));

        assert!(!store.is_saved(&Key::new("a")).await.unwrap());
        assert_eq!(store.backend().lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_init_uses_configured_capacity() {
        let config = StoreConfig::new("mem://", "db", "items").with_cache_capacity(1);
        let store = DeduplicatingStore::<Record, MapBackend>::init(&config)
            .await
            .unwrap();

        store.save(&Record::new("a")).await.unwrap();
        store.save(&Record::new("b")).await.unwrap();

        assert!(store.is_saved(&Key::new("b")).await.unwrap());
        assert_eq!(store.backend().lookups.load(Ordering::SeqCst), 0);
        // "a" fell out of the cache but is still in the backend
        assert!(store.is_saved(&Key::new("a")).await.unwrap());
        assert_eq!(store.backend().lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_label_comes_from_backend() {
        let store = DeduplicatingStore::new(MapBackend::default());
        assert_eq!(store.label().as_str(), "backend");
    }

    #[tokio::test]
    async fn test_init_reports_connection_failure() {
        let config = StoreConfig::new("tcp://nowhere", "db", "items");
        let result = DeduplicatingStore::<Record, MapBackend>::init(&config).await;
        assert!(matches!(result, Err(StoreError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_init_rejects_invalid_config() {
        let config = StoreConfig::new("mem://", "", "items");
        let result = DeduplicatingStore::<Record, MapBackend>::init(&config).await;
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }
}
