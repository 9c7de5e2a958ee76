//! Test support for seenbox: an instrumented in-memory backend and span
//! capture helpers, plus the workspace's integration tests under `tests/`.

pub mod mock_backend;
pub mod tracing;

pub use mock_backend::{BackendCounters, MockBackend};

use seenbox_core::Record;

/// Record with a small payload, the way a scraper would produce it.
pub fn paste(key: impl Into<seenbox_core::Key>) -> Record {
    Record::new(key)
        .with("title", "untitled")
        .with("syntax", "text")
}
