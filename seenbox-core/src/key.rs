//! Item identifier.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Opaque identifier of an item.
///
/// Keys compare by exact string equality. No normalization (case folding,
/// trimming, unicode normalization) is ever applied, so `"abc"` and `"ABC"`
/// are different items.
///
/// Cloning is cheap: short keys are stored inline and longer ones are
/// reference counted, which matters because the recency cache keeps its own
/// copy of every key it tracks.
///
/// # Example
/// ```
/// use seenbox_core::Key;
///
/// let key = Key::new("d41d8cd98f00b204e9800998ecf8427e");
/// assert_eq!(key.as_str(), "d41d8cd98f00b204e9800998ecf8427e");
/// assert_ne!(Key::new("abc"), Key::new("ABC"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(SmolStr);

impl Key {
    /// Creates a new key.
    #[inline]
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    /// Creates a key from a static string (no allocation).
    #[inline]
    pub const fn new_static(s: &'static str) -> Self {
        Self(SmolStr::new_static(s))
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for Key {
    #[inline]
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl From<SmolStr> for Key {
    #[inline]
    fn from(s: SmolStr) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Key {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert_eq!(Key::new("abc"), Key::from("abc"));
        assert_ne!(Key::new("abc"), Key::new("abc "));
        assert_ne!(Key::new("abc"), Key::new("ABC"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Key::new("paste-1")).unwrap();
        assert_eq!(json, "\"paste-1\"");

        let key: Key = serde_json::from_str("\"paste-2\"").unwrap();
        assert_eq!(key.as_str(), "paste-2");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Key::new_static("shown")), "shown");
    }
}
