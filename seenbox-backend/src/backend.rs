use std::sync::Arc;

use async_trait::async_trait;
use seenbox_core::{BackendLabel, Item, Key};

use crate::{BackendError, ConnectionConfig};

pub type BackendResult<T> = Result<T, BackendError>;

/// Durable store the gateway writes through to.
///
/// Implementations must be safe to call concurrently from many tasks; the
/// gateway issues queries and writes without any locking of its own.
#[async_trait]
pub trait Backend<I>: Sync + Send
where
    I: Item + 'static,
{
    /// Looks up an item by key.
    ///
    /// Returns `Ok(None)` when no such record exists. Any other outcome that
    /// is not a found record must be an error.
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>>;

    /// Persists an item.
    ///
    /// No uniqueness is enforced here: inserting the same key twice stores
    /// two records unless the store itself rejects it.
    async fn insert_one(&self, item: &I) -> BackendResult<()>;

    /// Returns the name of this backend for spans and metrics.
    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("backend")
    }
}

#[async_trait]
impl<I> Backend<I> for &dyn Backend<I>
where
    I: Item + 'static,
{
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>> {
        (*self).find_by_key(key).await
    }

    async fn insert_one(&self, item: &I) -> BackendResult<()> {
        (*self).insert_one(item).await
    }

    fn label(&self) -> BackendLabel {
        (*self).label()
    }
}

#[async_trait]
impl<I> Backend<I> for Box<dyn Backend<I>>
where
    I: Item + 'static,
{
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>> {
        (**self).find_by_key(key).await
    }

    async fn insert_one(&self, item: &I) -> BackendResult<()> {
        (**self).insert_one(item).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

#[async_trait]
impl<I> Backend<I> for Arc<dyn Backend<I> + Send + 'static>
where
    I: Item + 'static,
{
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>> {
        (**self).find_by_key(key).await
    }

    async fn insert_one(&self, item: &I) -> BackendResult<()> {
        (**self).insert_one(item).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

/// Backends that can open their own connection from a [`ConnectionConfig`].
///
/// `connect` should fail with [`BackendError::ConnectionError`] when the
/// handle cannot be built or the first round trip to the store fails, so a
/// misconfigured gateway is caught at startup instead of on the first item.
#[async_trait]
pub trait Connect: Sized + Send {
    /// Opens a connection and performs the initial handshake.
    async fn connect(config: &ConnectionConfig) -> BackendResult<Self>;
}
