use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a JSON-RPC request/response id.
///
/// An identifier established by the Client that MUST contain a String or
/// Number value if included. If it is not included (2.0) or is `null` (1.0),
/// the request is assumed to be a notification.
///
/// The Server **MUST** reply with the same value in the Response object so
/// the two can be correlated.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(untagged)]
pub enum Id {
    /// Numeric id
    Num(u64),
    /// String id
    Str(String),
}

impl Id {
    /// If the `Id` is a Number, returns the associated number.
    /// Returns None otherwise.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Num(id) => Some(*id),
            _ => None,
        }
    }

    /// If the `Id` is a String, returns the associated str.
    /// Returns None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(id) => write!(f, "{}", id),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self::Num(id)
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self::Str(id.into())
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        match id {
            Id::Num(id) => Self::Number(id.into()),
            Id::Str(id) => Self::String(id),
        }
    }
}
