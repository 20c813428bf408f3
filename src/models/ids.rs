//! Opaque identifiers handed over by the data source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier that is only meaningful within one data source.
///
/// Providers hand out numeric and string ids interchangeably, so the id is
/// always kept in its textual form and never interpreted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Create a new id from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the id carries no characters after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({})", self.0)
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for SourceId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Type alias for fixture IDs
pub type MatchId = SourceId;

/// Type alias for team IDs
pub type TeamId = SourceId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_display() {
        let id = SourceId::new("8123401");
        assert_eq!(format!("{}", id), "8123401");
    }

    #[test]
    fn test_source_id_from_number() {
        let id = SourceId::from(42u64);
        assert_eq!(id.as_str(), "42");
        assert_eq!(id, SourceId::from("42"));
    }

    #[test]
    fn test_source_id_blank() {
        assert!(SourceId::from("   ").is_blank());
        assert!(!SourceId::from("x").is_blank());
    }

    #[test]
    fn test_source_id_serialization() {
        let id = SourceId::from("team-77");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"team-77\"");
        let deserialized: SourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_source_id_debug() {
        let debug_str = format!("{:?}", SourceId::from("debug-test"));
        assert!(debug_str.contains("debug-test"));
    }
}
