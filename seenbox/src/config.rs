use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use seenbox_backend::ConnectionConfig;
use seenbox_core::DEFAULT_CAPACITY;
use thiserror::Error;

/// Errors produced while loading or validating a [`StoreConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML or does not match the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A field holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Gateway configuration.
///
/// A flat structure with three required connection fields and an optional
/// cache size:
///
/// ```yaml
/// uri: mongodb://localhost:27017
/// database: scraper
/// collection: pastes
/// cache_capacity: 250
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Connection URI of the backing store.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Collection name.
    pub collection: String,
    /// Number of recently saved keys kept in memory.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl StoreConfig {
    /// Creates a configuration with the default cache capacity.
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
            cache_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Sets the cache capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks that the connection fields are set and the capacity is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.connection()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "`cache_capacity` must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Connection parameters handed to the backend.
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.uri, &self.database, &self.collection)
    }
}

impl From<ConnectionConfig> for StoreConfig {
    fn from(connection: ConnectionConfig) -> Self {
        Self::new(connection.uri, connection.database, connection.collection)
    }
}
