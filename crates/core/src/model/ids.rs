use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a person record.
///
/// Directory sources hand out ids as either strings or integers; both are kept
/// in their textual form so comparisons never depend on the source's encoding.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new `RecordId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementation ────────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                kind: "RecordId".to_string(),
            });
        }
        Ok(RecordId::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new("42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_record_id_from_number_matches_string() {
        assert_eq!(RecordId::from(7_u64), RecordId::new("7"));
    }

    #[test]
    fn test_record_id_from_str_trims() {
        let id: RecordId = " 123 ".parse().unwrap();
        assert_eq!(id, RecordId::new("123"));
    }

    #[test]
    fn test_record_id_from_str_empty() {
        let result = "   ".parse::<RecordId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RecordId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
