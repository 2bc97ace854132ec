//! Ranked object identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque identifier for a ranked entity.
///
/// The derived ordering places every integer (numeric order) before every
/// string (lexicographic order), which gives the universe a total order even
/// when a ranking mixes both kinds.
///
/// `UInt` only ever holds values above `i64::MAX`, so declaring it between
/// `Int` and `Text` keeps integer order numeric across the whole JSON range.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankedObject {
    /// Integer identifier.
    Int(i64),
    /// Unsigned integer identifier too large for `Int`.
    UInt(u64),
    /// String identifier.
    Text(String),
}

impl RankedObject {
    /// Interpret a JSON scalar as an object.
    ///
    /// Strings and integral numbers map directly. Anything else is kept as
    /// its compact JSON text so that it still behaves as a distinct atom.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                (None, Some(u)) => Self::UInt(u),
                (None, None) => Self::Text(n.to_string()),
            },
            other => Self::Text(other.to_string()),
        }
    }
}

impl std::fmt::Display for RankedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RankedObject {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for RankedObject {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Self::Int(i),
            Err(_) => Self::UInt(value),
        }
    }
}

impl From<&str> for RankedObject {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RankedObject {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
