//! Connection parameters shared by every backend.

use serde::{Deserialize, Serialize};

use crate::BackendError;

/// Where the backing store lives.
///
/// All three fields are required and must be non-empty. What they mean is up
/// to the backend: for MongoDB they are the connection string, the database
/// name and the collection name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Connection URI, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    /// Database identifier.
    pub database: String,
    /// Collection (or table) identifier.
    pub collection: String,
}

impl ConnectionConfig {
    /// Creates connection parameters.
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Checks that every field is present.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), BackendError> {
        for (name, value) in [
            ("uri", &self.uri),
            ("database", &self.database),
            ("collection", &self.collection),
        ] {
            if value.trim().is_empty() {
                return Err(BackendError::InvalidConfig(format!(
                    "`{name}` must not be empty"
                )));
            }
        }
        Ok(())
    }
}
