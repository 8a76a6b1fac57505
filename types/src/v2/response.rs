use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, id::Id, v2::version::Version};

/// Represents a JSON-RPC 2.0 success response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Success {
    /// A String specifying the version of the JSON-RPC protocol.
    pub jsonrpc: Version,
    /// Successful execution result.
    pub result: Value,
    /// Correlation id, the same value as the request's `id` member.
    pub id: Id,
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Success` is serializable");
        write!(f, "{}", json)
    }
}

impl Success {
    /// Creates a JSON-RPC 2.0 success response.
    pub fn new(result: Value, id: Id) -> Self {
        Self {
            jsonrpc: Version::V2_0,
            result,
            id,
        }
    }
}

/// Represents a JSON-RPC 2.0 failure response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Failure {
    /// A String specifying the version of the JSON-RPC protocol.
    pub jsonrpc: Version,
    /// Failed execution error.
    pub error: Error,
    /// Correlation id. Null when the id of the originating request could
    /// not be recovered (e.g. Parse error / Invalid Request).
    pub id: Option<Id>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Failure` is serializable");
        write!(f, "{}", json)
    }
}

impl Failure {
    /// Creates a JSON-RPC 2.0 failure response.
    pub fn new(error: Error, id: Option<Id>) -> Self {
        Self {
            jsonrpc: Version::V2_0,
            error,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    use super::*;

    #[test]
    fn success_serialization() {
        let success = Success::new(Value::Bool(true), Id::Num(1));
        let expect = r#"{"jsonrpc":"2.0","result":true,"id":1}"#;
        assert_eq!(serde_json::to_string(&success).unwrap(), expect);
        assert_eq!(serde_json::from_str::<Success>(expect).unwrap(), success);
    }

    #[test]
    fn failure_serialization() {
        let failure = Failure::new(Error::new(ErrorKind::InvalidRequest), None);
        let expect = r#"{"jsonrpc":"2.0","error":{"code":-32600,"message":"Invalid request"},"id":null}"#;
        assert_eq!(serde_json::to_string(&failure).unwrap(), expect);
        assert_eq!(serde_json::from_str::<Failure>(expect).unwrap(), failure);
    }

    #[test]
    fn mixed_members_are_rejected() {
        let mixed = r#"{"jsonrpc":"2.0","result":5,"error":{"code":-32603,"message":"x"},"id":1}"#;
        assert!(serde_json::from_str::<Success>(mixed).is_err());
        assert!(serde_json::from_str::<Failure>(mixed).is_err());
    }
}
