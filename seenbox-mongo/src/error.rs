//! Error types for MongoDB backend operations.
//!
//! All errors can be converted to [`BackendError`] for uniform handling by
//! the gateway.
//!
//! [`BackendError`]: seenbox_backend::BackendError

use mongodb::error::Error as DriverError;
use seenbox_backend::BackendError;

/// Error type for MongoDB backend operations.
///
/// # When You'll Encounter This
///
/// - Building a backend with a malformed connection string
/// - Building a backend without a database or collection name
/// - Any query or insert the server rejects or that fails on the network
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    /// An error from the underlying MongoDB driver.
    ///
    /// This includes URI parsing, server selection, authentication and
    /// command failures.
    #[error("MongoDB backend error: {0}")]
    Mongo(#[from] DriverError),

    /// A required builder setting was left empty.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<MongoError> for BackendError {
    fn from(error: MongoError) -> Self {
        match error {
            MongoError::InvalidConfig(message) => Self::InvalidConfig(message),
            error => Self::InternalError(Box::new(error)),
        }
    }
}
