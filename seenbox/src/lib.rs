#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # seenbox
//!
//! A deduplicating persistence gateway.
//!
//! An ingestion pipeline usually finds candidate items much faster than it
//! can ask a remote store whether each one is new. [`DeduplicatingStore`]
//! sits between the two: it writes items through to a [`Backend`] and keeps
//! the keys of the items it saved in a small [`RecencyCache`], so items that
//! come back shortly after being saved are recognized without a round trip.
//!
//! ```no_run
//! use seenbox::{DeduplicatingStore, StoreConfig};
//! use seenbox_core::{Key, Record};
//! # use seenbox_backend::{Backend, BackendResult, Connect, ConnectionConfig};
//! # struct Mongo;
//! # #[async_trait::async_trait]
//! # impl Backend<Record> for Mongo {
//! #     async fn find_by_key(&self, _: &Key) -> BackendResult<Option<Record>> { Ok(None) }
//! #     async fn insert_one(&self, _: &Record) -> BackendResult<()> { Ok(()) }
//! # }
//! # #[async_trait::async_trait]
//! # impl Connect for Mongo {
//! #     async fn connect(_: &ConnectionConfig) -> BackendResult<Self> { Ok(Mongo) }
//! # }
//!
//! # async fn run() -> Result<(), seenbox::StoreError> {
//! let config = StoreConfig::new("mongodb://localhost:27017", "scraper", "pastes");
//! let store = DeduplicatingStore::<Record, Mongo>::init(&config).await?;
//!
//! let paste = Record::new("5d41402abc4b2a76");
//! if !store.is_saved(&Key::new("5d41402abc4b2a76")).await? {
//!     store.save(&paste).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The cache is a best-effort accelerator, not a source of truth: keys found
//! in the backend by [`DeduplicatingStore::is_saved`] are not cached, and
//! nothing is shared between processes or kept across restarts.
//!
//! ## Feature Flags
//!
//! - `metrics` - record cache hits/misses and backend outcomes with the `metrics` crate
//! - `test-helpers` - expose the store's cache for invariant checks

/// Gateway configuration.
pub mod config;

/// Error types returned by the gateway.
pub mod error;

/// Metrics collection for gateway observability.
///
/// When the `metrics` feature is enabled, this module records counters for
/// cache hits and misses and for backend failures; otherwise every function
/// is a no-op.
pub mod metrics;

mod store;

pub use config::{ConfigError, StoreConfig};
pub use error::StoreError;
pub use store::DeduplicatingStore;

pub use seenbox_backend::{Backend, BackendError, BackendResult, Connect, ConnectionConfig};
pub use seenbox_core::{BackendLabel, DEFAULT_CAPACITY, Item, Key, RecencyCache, Record};
