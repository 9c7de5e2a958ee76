//! Bounded FIFO set of recently saved keys.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::Key;

/// Number of keys a [`RecencyCache`] keeps unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 250;

/// Fixed-capacity, insertion-ordered set of keys with FIFO eviction.
///
/// The cache remembers keys in the order they were added. Once more than
/// `capacity` keys have been added, every new key pushes out the single
/// oldest one. Lookups do not refresh a key's position: eviction order is
/// the order of discovery, not of access.
///
/// Both operations run under one mutex, so a concurrent reader never sees a
/// half-applied insertion and an eviction always removes whichever key is
/// oldest at that moment. The critical sections are short and never wait on
/// I/O.
///
/// # Example
/// ```
/// use seenbox_core::{Key, RecencyCache};
///
/// let cache = RecencyCache::with_capacity(2);
/// cache.add(Key::new("a"));
/// cache.add(Key::new("b"));
/// cache.add(Key::new("c"));
///
/// assert!(!cache.contains(&Key::new("a")));
/// assert!(cache.contains(&Key::new("b")));
/// assert!(cache.contains(&Key::new("c")));
/// ```
pub struct RecencyCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

#[derive(Default)]
struct Entries {
    order: VecDeque<Key>,
    members: HashSet<Key>,
}

impl RecencyCache {
    /// Creates an empty cache holding at most [`DEFAULT_CAPACITY`] keys.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` keys.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(Entries {
                order: VecDeque::with_capacity(capacity + 1),
                members: HashSet::with_capacity(capacity + 1),
            }),
        }
    }

    /// Appends `key` as the newest entry, evicting the oldest one if the cache
    /// grows past its capacity.
    ///
    /// Adding a key that is already tracked leaves the cache unchanged; the key
    /// keeps its original position in the eviction order.
    pub fn add(&self, key: Key) {
        let mut entries = self.lock();
        if entries.members.contains(&key) {
            return;
        }
        entries.order.push_back(key.clone());
        entries.members.insert(key);
        if entries.order.len() > self.capacity
            && let Some(oldest) = entries.order.pop_front()
        {
            entries.members.remove(&oldest);
        }
    }

    /// Returns `true` if `key` is among the tracked keys.
    pub fn contains(&self, key: &Key) -> bool {
        self.lock().members.contains(key)
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    /// Returns `true` if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of tracked keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the tracked keys, oldest first.
    pub fn keys(&self) -> Vec<Key> {
        self.lock().order.iter().cloned().collect()
    }

    // A panic while holding the lock cannot leave `order` and `members` out of
    // step in a way later calls depend on, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecencyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecencyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
