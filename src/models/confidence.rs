//! How far a model-based figure can be trusted.

use serde::{Deserialize, Serialize};

/// Confidence attached to Poisson estimates. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Generic parameters, nothing known about the competition
    #[default]
    Low,
    /// Parameters matched to the competition type (reserve/youth, women's)
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    /// Warning to print next to a figure, if it rests on generic parameters.
    pub fn caveat(&self) -> Option<&'static str> {
        match self {
            Confidence::Low => Some("generic league parameters, treat as a rough guide"),
            Confidence::Medium | Confidence::High => None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_low_confidence_carries_caveat() {
        assert!(Confidence::Low.caveat().is_some());
        assert_eq!(Confidence::Medium.caveat(), None);
        assert_eq!(Confidence::High.caveat(), None);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::default(), Confidence::Low);
    }

    #[test]
    fn test_confidence_wire_format() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"medium\"");

        let parsed: Confidence = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Confidence::Low);
        assert_eq!(parsed.to_string(), "low");
    }
}
