use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use seenbox_backend::{Backend, BackendError, BackendResult};
use seenbox_core::{BackendLabel, Item, Key, Record};

#[derive(Debug, Default)]
pub struct BackendCounters {
    pub find_count: AtomicUsize,
    pub find_hit_count: AtomicUsize,
    pub find_miss_count: AtomicUsize,
    pub insert_count: AtomicUsize,
}

impl BackendCounters {
    pub fn find_count(&self) -> usize {
        self.find_count.load(Ordering::SeqCst)
    }

    pub fn find_hit_count(&self) -> usize {
        self.find_hit_count.load(Ordering::SeqCst)
    }

    pub fn find_miss_count(&self) -> usize {
        self.find_miss_count.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.find_count.store(0, Ordering::SeqCst);
        self.find_hit_count.store(0, Ordering::SeqCst);
        self.find_miss_count.store(0, Ordering::SeqCst);
        self.insert_count.store(0, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct Faults {
    fail_queries: AtomicBool,
    fail_writes: AtomicBool,
    forbid_queries: AtomicBool,
}

/// In-memory backend that counts calls and fails on demand.
///
/// Clones share storage, counters and fault switches, so a test can keep a
/// handle after moving the backend into a store.
#[derive(Clone, Debug)]
pub struct MockBackend<I = Record> {
    pub records: Arc<DashMap<Key, I>>,
    pub counters: Arc<BackendCounters>,
    faults: Arc<Faults>,
    latency: Option<Duration>,
}

impl<I> Default for MockBackend<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> MockBackend<I> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            counters: Arc::new(BackendCounters::default()),
            faults: Arc::new(Faults::default()),
            latency: None,
        }
    }

    /// Sleeps before every call, to widen race windows.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Panics on any lookup. For asserting an answer came from the cache.
    pub fn forbid_queries(&self, forbid: bool) {
        self.faults.forbid_queries.store(forbid, Ordering::SeqCst);
    }

    /// Makes lookups fail with a backend error.
    pub fn fail_queries(&self, fail: bool) {
        self.faults.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Makes inserts fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.faults.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn find_count(&self) -> usize {
        self.counters.find_count()
    }

    pub fn find_hit_count(&self) -> usize {
        self.counters.find_hit_count()
    }

    pub fn find_miss_count(&self) -> usize {
        self.counters.find_miss_count()
    }

    pub fn insert_count(&self) -> usize {
        self.counters.insert_count()
    }

    pub fn reset_counters(&self) {
        self.counters.reset();
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl<I> MockBackend<I>
where
    I: Item,
{
    /// Stores an item directly, bypassing any gateway in front of this backend.
    pub fn seed(&self, item: I) {
        self.records.insert(item.key().clone(), item);
    }
}

#[async_trait]
impl<I> Backend<I> for MockBackend<I>
where
    I: Item + Clone + 'static,
{
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>> {
        assert!(
            !self.faults.forbid_queries.load(Ordering::SeqCst),
            "backend was queried for `{key}` while queries are forbidden"
        );
        self.counters.find_count.fetch_add(1, Ordering::SeqCst);
        self.delay().await;

        if self.faults.fail_queries.load(Ordering::SeqCst) {
            return Err(BackendError::internal(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )));
        }

        let result = self.records.get(key).map(|v| v.value().clone());
        if result.is_some() {
            self.counters.find_hit_count.fetch_add(1, Ordering::SeqCst);
        } else {
            self.counters.find_miss_count.fetch_add(1, Ordering::SeqCst);
        }
        Ok(result)
    }

    async fn insert_one(&self, item: &I) -> BackendResult<()> {
        self.counters.insert_count.fetch_add(1, Ordering::SeqCst);
        self.delay().await;

        if self.faults.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::internal(io::Error::new(
                io::ErrorKind::TimedOut,
                "write timed out",
            )));
        }

        self.records.insert(item.key().clone(), item.clone());
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("mock")
    }
}
