//! Record identity and per-type collection rules

use serde::{Deserialize, Serialize};

/// Identifier of a content record
///
/// The backend is inconsistent about id representation: initial fetches carry
/// numbers, push events sometimes carry the same id as a string. Equality is
/// therefore normalized: two ids match when both coerce to the same number,
/// or, failing that, when their string forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Numeric coercion: `Number` as-is, `Text` via parse
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Normalized equality across numeric and string representations
    pub fn matches(&self, other: &RecordId) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }

    fn as_text(&self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A content record that can live in a synced collection
///
/// `reorder` is the per-type display-order rule, reapplied to the whole
/// collection after every merge and every full refetch.
pub trait Record: Clone + Send + Sync + serde::de::DeserializeOwned + 'static {
    /// Stable identifier, unique within the record type
    fn id(&self) -> RecordId;

    /// Reapply the type's display-order rule (default: keep arrival order)
    fn reorder(_records: &mut Vec<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text_normalized_equality() {
        assert!(RecordId::Number(7).matches(&RecordId::Text("7".into())));
        assert!(RecordId::Text(" 7 ".into()).matches(&RecordId::Number(7)));
        assert!(!RecordId::Number(7).matches(&RecordId::Number(8)));
    }

    #[test]
    fn test_non_numeric_text_compares_as_string() {
        assert!(RecordId::Text("abc-1".into()).matches(&RecordId::Text("abc-1".into())));
        assert!(!RecordId::Text("abc-1".into()).matches(&RecordId::Number(1)));
    }

    #[test]
    fn test_untagged_decode() {
        let n: RecordId = serde_json::from_str("12").expect("number id");
        let s: RecordId = serde_json::from_str("\"12\"").expect("text id");
        assert!(n.matches(&s));
    }
}
