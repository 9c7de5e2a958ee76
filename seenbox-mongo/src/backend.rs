//! MongoDB backend implementation.

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use seenbox_backend::{Backend, BackendError, BackendResult, Connect, ConnectionConfig};
use seenbox_core::{BackendLabel, Item, Key};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::MongoError;

/// Document field holding the item key unless configured otherwise.
pub const DEFAULT_KEY_FIELD: &str = "key";

/// MongoDB backing store based on the official `mongodb` driver.
///
/// Items are serialized with serde into BSON documents, one per item.
/// Lookups are `find_one({<key_field>: key})`; the collection should carry
/// an index on the key field, which this backend does not create.
///
/// The driver's [`Client`] pools connections internally, so a single
/// backend can be shared by every task of the gateway. Cloning is cheap.
pub struct MongoBackend<I>
where
    I: Send + Sync,
{
    database: Database,
    collection: Collection<I>,
    key_field: String,
    label: BackendLabel,
}

impl<I> Clone for MongoBackend<I>
where
    I: Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            collection: self.collection.clone(),
            key_field: self.key_field.clone(),
            label: self.label.clone(),
        }
    }
}

impl<I> fmt::Debug for MongoBackend<I>
where
    I: Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoBackend")
            .field("label", &self.label)
            .field("database", &self.database.name())
            .field("collection", &self.collection.name())
            .field("key_field", &self.key_field)
            .finish()
    }
}

impl<I> MongoBackend<I>
where
    I: Send + Sync,
{
    /// Creates new MongoBackend builder with default settings.
    #[must_use]
    pub fn builder() -> MongoBackendBuilder {
        MongoBackendBuilder::default()
    }

    /// Round trip to the server to prove the connection works.
    ///
    /// The driver connects lazily, so a freshly built backend has not talked
    /// to the server yet.
    pub async fn ping(&self) -> Result<(), MongoError> {
        trace!(database = self.database.name(), "Ping MongoDB");
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Name of the document field holding the key.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    fn filter(&self, key: &Key) -> Document {
        let mut filter = Document::new();
        filter.insert(self.key_field.as_str(), key.as_str());
        filter
    }
}

/// Part of builder pattern implementation for MongoBackend.
#[derive(Debug, Clone)]
pub struct MongoBackendBuilder {
    uri: String,
    database: String,
    collection: String,
    key_field: String,
    label: BackendLabel,
}

impl Default for MongoBackendBuilder {
    fn default() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".to_owned(),
            database: String::new(),
            collection: String::new(),
            key_field: DEFAULT_KEY_FIELD.to_owned(),
            label: BackendLabel::new_static("mongo"),
        }
    }
}

impl MongoBackendBuilder {
    /// Set connection string for MongoBackend.
    pub fn server(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Set database name. Required.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set collection name. Required.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the document field the key is stored in.
    pub fn key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Set a custom label for this backend.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Copies uri, database and collection from shared connection parameters.
    pub fn connection(self, config: &ConnectionConfig) -> Self {
        self.server(config.uri.clone())
            .database(config.database.clone())
            .collection(config.collection.clone())
    }

    /// Create new instance of MongoDB backend with passed settings.
    ///
    /// Parses the connection string and sets up the driver; no command is sent
    /// to the server until the first operation or [`MongoBackend::ping`].
    pub async fn build<I>(self) -> Result<MongoBackend<I>, MongoError>
    where
        I: Send + Sync,
    {
        for (name, value) in [
            ("database", &self.database),
            ("collection", &self.collection),
            ("key_field", &self.key_field),
        ] {
            if value.is_empty() {
                return Err(MongoError::InvalidConfig(format!("`{name}` is not set")));
            }
        }

        trace!("Initialize new MongoDB client");
        let client = Client::with_uri_str(&self.uri).await?;
        let database = client.database(&self.database);
        let collection = database.collection::<I>(&self.collection);

        Ok(MongoBackend {
            database,
            collection,
            key_field: self.key_field,
            label: self.label,
        })
    }
}

#[async_trait]
impl<I> Backend<I> for MongoBackend<I>
where
    I: Item + Serialize + DeserializeOwned + 'static,
{
    async fn find_by_key(&self, key: &Key) -> BackendResult<Option<I>> {
        trace!(key = %key, "Find item by key");
        let found = self
            .collection
            .find_one(self.filter(key))
            .await
            .map_err(MongoError::from)?;
        Ok(found)
    }

    async fn insert_one(&self, item: &I) -> BackendResult<()> {
        trace!(key = %item.key(), "Insert item");
        self.collection
            .insert_one(item)
            .await
            .map_err(MongoError::from)?;
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}

#[async_trait]
impl<I> Connect for MongoBackend<I>
where
    I: Item + 'static,
{
    async fn connect(config: &ConnectionConfig) -> BackendResult<Self> {
        config.validate()?;
        let backend: Self = Self::builder()
            .connection(config)
            .build()
            .await
            .map_err(build_error)?;
        backend.ping().await.map_err(BackendError::connection)?;
        Ok(backend)
    }
}

/// Invalid settings stay configuration errors, anything the driver rejects
/// while setting up the client is a connection failure.
fn build_error(error: MongoError) -> BackendError {
    match error {
        MongoError::InvalidConfig(_) => BackendError::from(error),
        error => BackendError::connection(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seenbox_core::Record;

    #[tokio::test]
    async fn test_build_requires_database() {
        let result = MongoBackend::<Record>::builder()
            .collection("pastes")
            .build::<Record>()
            .await;
        assert!(matches!(result, Err(MongoError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_build_with_custom_settings() {
        let backend = MongoBackend::<Record>::builder()
            .server("mongodb://localhost:27017")
            .database("scraper")
            .collection("pastes")
            .key_field("fingerprint")
            .label("pastes")
            .build::<Record>()
            .await
            .unwrap();

        assert_eq!(backend.key_field(), "fingerprint");
        assert_eq!(Backend::label(&backend).as_str(), "pastes");
        assert_eq!(backend.filter(&Key::new("abc")), doc! { "fingerprint": "abc" });
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let config = ConnectionConfig::new("not-a-mongo-uri", "scraper", "pastes");
        let result = <MongoBackend<Record> as Connect>::connect(&config).await;
        assert!(matches!(result, Err(BackendError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_empty_key_field_is_a_config_error() {
        let error = MongoBackend::<Record>::builder()
            .database("scraper")
            .collection("pastes")
            .key_field("")
            .build::<Record>()
            .await
            .unwrap_err();
        assert!(matches!(build_error(error), BackendError::InvalidConfig(ref m) if m.contains("key_field")));
    }

    #[tokio::test]
    async fn test_driver_build_failure_is_a_connection_error() {
        let error = MongoBackend::<Record>::builder()
            .server("not-a-mongo-uri")
            .database("scraper")
            .collection("pastes")
            .build::<Record>()
            .await
            .unwrap_err();
        assert!(matches!(build_error(error), BackendError::ConnectionError(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_fields() {
        let config = ConnectionConfig::new("mongodb://localhost", "scraper", "");
        let result = <MongoBackend<Record> as Connect>::connect(&config).await;
        assert!(matches!(result, Err(BackendError::InvalidConfig(_))));
    }
}
