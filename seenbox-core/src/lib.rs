#![warn(missing_docs)]
//! # seenbox-core
//!
//! Core types for the seenbox deduplicating persistence gateway.
//!
//! This crate is the leaf of the workspace and knows nothing about storage.
//! It defines:
//!
//! - [`Key`] - the opaque identifier used to decide whether an item is new
//! - [`Item`] - anything that carries a [`Key`]; [`Record`] is a ready-made one
//! - [`RecencyCache`] - the bounded, insertion-ordered set of recently saved keys
//! - [`BackendLabel`] - a cheap name for a storage backend, used in spans and metrics

pub mod item;
pub mod key;
pub mod label;
pub mod recency;

pub use item::{Item, Record};
pub use key::Key;
pub use label::BackendLabel;
pub use recency::{DEFAULT_CAPACITY, RecencyCache};
#[doc(hidden)]
pub use smol_str::SmolStr;
