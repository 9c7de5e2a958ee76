use seenbox_backend::BackendError;
use seenbox_core::Key;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by [`DeduplicatingStore`](crate::DeduplicatingStore).
///
/// A record that does not exist in the backend is never an error; it is the
/// `Ok(false)` answer of `is_saved`. When an error is returned, whether the
/// item is saved is unknown.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached during `init`.
    ///
    /// Fatal: the store was not created.
    #[error("could not connect to the backing store: {0}")]
    ConnectionError(#[source] BackendError),

    /// The backing store failed while looking up a key.
    #[error("could not search for item `{key}`: {source}")]
    StoreQueryError {
        /// Key that was being looked up.
        key: Key,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// The backing store failed to persist an item.
    ///
    /// The recency cache is left untouched, so retrying the save is safe.
    #[error("could not save item `{key}`: {source}")]
    StoreWriteError {
        /// Key of the item that was being saved.
        key: Key,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}
