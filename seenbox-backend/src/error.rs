//! Error types for backend operations.

use thiserror::Error;

/// Error type for backend operations.
///
/// This enum categorizes errors that can occur while talking to a backing
/// store into distinct groups for appropriate handling. A missing record is
/// not an error: backends report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    ///
    /// Any error not related to establishing the connection, including
    /// failures of individual queries and writes.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Connection could not be established or the handshake failed.
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),

    /// The connection parameters are incomplete or malformed.
    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl BackendError {
    /// Wraps any error as [`BackendError::InternalError`].
    pub fn internal(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InternalError(Box::new(error))
    }

    /// Wraps any error as [`BackendError::ConnectionError`].
    pub fn connection(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::ConnectionError(Box::new(error))
    }
}
