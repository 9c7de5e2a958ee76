//! MongoDB backing store for seenbox.
//!
//! [`MongoBackend`] stores every item as one document in a single collection
//! and finds records by an equality filter on the key field.
//!
//! ```no_run
//! use seenbox_core::Record;
//! use seenbox_mongo::MongoBackend;
//!
//! # async fn run() -> Result<(), seenbox_mongo::MongoError> {
//! let backend: MongoBackend<Record> = MongoBackend::<Record>::builder()
//!     .server("mongodb://localhost:27017")
//!     .database("scraper")
//!     .collection("pastes")
//!     .build()
//!     .await?;
//! backend.ping().await?;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backend;
pub mod error;

#[doc(inline)]
pub use crate::backend::{MongoBackend, MongoBackendBuilder};
#[doc(inline)]
pub use crate::error::MongoError;
