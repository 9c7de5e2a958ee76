// #![warn(missing_docs)]
//! Traits and structs for seenbox backing store interaction.
//!
//! If you want to persist items somewhere new, implement [`Backend`] (and
//! [`Connect`] if the store can be opened from a [`ConnectionConfig`]).
mod backend;
mod config;
mod error;

pub use backend::{Backend, BackendResult, Connect};
pub use config::ConnectionConfig;
pub use error::BackendError;
pub use seenbox_core::{BackendLabel, Item, Key};
