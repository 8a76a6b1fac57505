use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{id::Id, params::Params, v2::version::Version};

/// Represents a JSON-RPC 2.0 request which is a method call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodCall {
    /// A String specifying the version of the JSON-RPC protocol.
    pub jsonrpc: Version,
    /// A String containing the name of the method to be invoked.
    pub method: String,
    /// A Structured value holding the parameter values to be used during
    /// the invocation of the method. This member MAY be omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// An identifier established by the Client.
    pub id: Id,
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`MethodCall` is serializable");
        write!(f, "{}", json)
    }
}

impl MethodCall {
    /// Creates a JSON-RPC 2.0 method call.
    pub fn new<M: Into<String>>(method: M, params: Option<Params>, id: Id) -> Self {
        Self {
            jsonrpc: Version::V2_0,
            method: method.into(),
            params,
            id,
        }
    }
}

/// Represents a JSON-RPC 2.0 request which is a notification.
///
/// A notification signifies the Client's lack of interest in the
/// corresponding Response object; the `id` member is absent entirely and
/// the Server MUST NOT reply, including inside a batch request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Notification {
    /// A String specifying the version of the JSON-RPC protocol.
    pub jsonrpc: Version,
    /// A String containing the name of the method to be invoked.
    pub method: String,
    /// A Structured value holding the parameter values to be used during
    /// the invocation of the method. This member MAY be omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Notification` is serializable");
        write!(f, "{}", json)
    }
}

impl Notification {
    /// Creates a JSON-RPC 2.0 notification.
    pub fn new<M: Into<String>>(method: M, params: Option<Params>) -> Self {
        Self {
            jsonrpc: Version::V2_0,
            method: method.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn method_call_serialization() {
        let cases = vec![
            (
                MethodCall::new("foo", Some(Params::Array(vec![Value::from(1), Value::Bool(true)])), Id::Num(1)),
                r#"{"jsonrpc":"2.0","method":"foo","params":[1,true],"id":1}"#,
            ),
            (
                MethodCall::new("foo", None, Id::Num(1)),
                r#"{"jsonrpc":"2.0","method":"foo","id":1}"#,
            ),
        ];
        for (call, expect) in cases {
            assert_eq!(serde_json::to_string(&call).unwrap(), expect);
            assert_eq!(serde_json::from_str::<MethodCall>(expect).unwrap(), call);
        }
    }

    #[test]
    fn notification_has_no_id_member() {
        let notification = Notification::new("ping", None);
        assert_eq!(
            serde_json::to_string(&notification).unwrap(),
            r#"{"jsonrpc":"2.0","method":"ping"}"#
        );
    }

    #[test]
    fn invalid_calls_are_rejected() {
        let cases = vec![
            r#"{"jsonrpc":"2.0","method":"foo","params":[1],"id":1,"unknown":[]}"#,
            r#"{"jsonrpc":"1.5","method":"foo","id":1}"#,
            r#"{"jsonrpc":"2.0","method":"foo"}"#,
        ];
        for case in cases {
            assert!(serde_json::from_str::<MethodCall>(case).is_err(), "{}", case);
        }

        let cases = vec![
            r#"{"jsonrpc":"2.0","method":"foo","id":1}"#,
            r#"{"jsonrpc":"2.0","unknown":[]}"#,
        ];
        for case in cases {
            assert!(serde_json::from_str::<Notification>(case).is_err(), "{}", case);
        }
    }
}
