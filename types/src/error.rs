use std::{error, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::id::Id;

/// JSON-RPC error kind with its well-known numeric code.
///
/// Codes -32700..-32600 are prescribed by the JSON-RPC 2.0 specification,
/// -32000..-32003 are the application-level kinds this protocol layer
/// defines on top of it. Any other code is carried through unchanged as
/// [`ErrorKind::ServerError`], so resolving a code to a kind and back is
/// lossless.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Invalid JSON was received by the server.
    ParseError,
    /// The JSON sent is not a valid Request object.
    InvalidRequest,
    /// The method does not exist / is not available.
    MethodNotFound,
    /// Invalid method parameter(s).
    InvalidParams,
    /// Internal JSON-RPC error ("all other errors").
    InternalError,
    /// A registered procedure raised an application-level exception.
    ProcedureException,
    /// The caller could not be authenticated.
    AuthenticationError,
    /// The caller is not allowed to invoke the method.
    PermissionDenied,
    /// Parameter values (as opposed to their shape) were rejected.
    InvalidParamValues,
    /// Any other implementation-defined error code.
    ServerError(i64),
}

impl From<i64> for ErrorKind {
    fn from(code: i64) -> Self {
        match code {
            -32700 => ErrorKind::ParseError,
            -32600 => ErrorKind::InvalidRequest,
            -32601 => ErrorKind::MethodNotFound,
            -32602 => ErrorKind::InvalidParams,
            -32603 => ErrorKind::InternalError,
            -32000 => ErrorKind::ProcedureException,
            -32001 => ErrorKind::AuthenticationError,
            -32002 => ErrorKind::PermissionDenied,
            -32003 => ErrorKind::InvalidParamValues,
            code => ErrorKind::ServerError(code),
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D>(deserializer: D) -> Result<ErrorKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: i64 = Deserialize::deserialize(deserializer)?;
        Ok(ErrorKind::from(code))
    }
}

impl ErrorKind {
    /// Returns the integer code value.
    pub fn code(&self) -> i64 {
        match self {
            ErrorKind::ParseError => -32700,
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::InternalError => -32603,
            ErrorKind::ProcedureException => -32000,
            ErrorKind::AuthenticationError => -32001,
            ErrorKind::PermissionDenied => -32002,
            ErrorKind::InvalidParamValues => -32003,
            ErrorKind::ServerError(code) => *code,
        }
    }

    /// Returns the default human-readable message for the kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::ParseError => "Parse error",
            ErrorKind::InvalidRequest => "Invalid request",
            ErrorKind::MethodNotFound => "Method not found",
            ErrorKind::InvalidParams => "Invalid parameters",
            ErrorKind::InternalError => "Internal error",
            ErrorKind::ProcedureException => "Procedure exception",
            ErrorKind::AuthenticationError => "Authentication error",
            ErrorKind::PermissionDenied => "Permission denied",
            ErrorKind::InvalidParamValues => "Invalid parameter values",
            ErrorKind::ServerError(_) => "Server error",
        }
    }
}

/// JSON-RPC Error Object as it appears on the wire.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// A Number that indicates the error type that occurred.
    pub code: ErrorKind,
    /// A String providing a short description of the error.
    pub message: String,
    /// A Primitive or Structured value with additional information about
    /// the error. May be omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl error::Error for Error {}

impl Error {
    /// Wraps the given `ErrorKind` with its default message.
    pub fn new(code: ErrorKind) -> Self {
        Error {
            message: code.description().to_owned(),
            code,
            data: None,
        }
    }
}

/// An in-flight protocol failure.
///
/// A `Fault` is created at validation-failure or invocation-failure time
/// and consumed immediately by a codec to build a wire error object; it is
/// never persisted. It carries the originating request id (when one could
/// be recovered) so the error response can be correlated.
#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    /// The error kind (and through it, the numeric code).
    pub kind: ErrorKind,
    /// Human-readable message, defaults from the kind.
    pub message: String,
    /// Optional JSON-serializable payload, opaque to this layer.
    pub data: Option<Value>,
    /// Id of the request this fault answers, if any.
    pub request_id: Option<Id>,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)?;
        if let Some(data) = &self.data {
            write!(f, " ({})", data)?;
        }
        Ok(())
    }
}

impl error::Error for Fault {}

impl Fault {
    /// Creates a fault of the given kind with its default message.
    pub fn new(kind: ErrorKind) -> Self {
        Fault {
            message: kind.description().to_owned(),
            kind,
            data: None,
            request_id: None,
        }
    }

    /// Creates a `ParseError` fault.
    pub fn parse_error(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ParseError).with_data(Value::String(format!("No valid JSON. ({})", detail)))
    }

    /// Creates an `InvalidRequest` fault with the given message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest).with_message(message)
    }

    /// Creates a `MethodNotFound` fault.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(ErrorKind::MethodNotFound).with_data(Value::String(format!("Method \"{}\" is not found.", method)))
    }

    /// Creates an `InvalidParams` fault with the given message.
    pub fn invalid_params(message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidParams).with_message(format!("Invalid parameters: {}", message))
    }

    /// Creates an `InternalError` fault with the given message.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError).with_message(message)
    }

    /// Sets the auxiliary data payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the correlating request id.
    pub fn with_id(mut self, id: Option<Id>) -> Self {
        self.request_id = id;
        self
    }

    /// Builds the wire error object for this fault.
    pub fn to_error(&self) -> Error {
        Error {
            code: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
        }
    }

    /// Reconstructs the most specific fault from a wire error object.
    ///
    /// Unknown codes are preserved unchanged through `ServerError`.
    pub fn from_error(error: Error, request_id: Option<Id>) -> Self {
        Fault {
            kind: error.code,
            message: error.message,
            data: error.data,
            request_id,
        }
    }
}

impl From<ErrorKind> for Fault {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINED_CODES: [i64; 9] = [
        -32700, -32600, -32601, -32602, -32603, -32000, -32001, -32002, -32003,
    ];

    #[test]
    fn code_kind_mapping_is_injective() {
        for code in DEFINED_CODES.iter() {
            let kind = ErrorKind::from(*code);
            assert!(!matches!(kind, ErrorKind::ServerError(_)));
            assert_eq!(kind.code(), *code);
        }
    }

    #[test]
    fn unknown_codes_round_trip() {
        let kind = ErrorKind::from(-31050);
        assert_eq!(kind, ErrorKind::ServerError(-31050));
        assert_eq!(kind.code(), -31050);
    }

    #[test]
    fn error_serialization() {
        assert_eq!(
            serde_json::to_string(&Error::new(ErrorKind::ParseError)).unwrap(),
            r#"{"code":-32700,"message":"Parse error"}"#
        );
        assert_eq!(
            serde_json::to_string(&Error::new(ErrorKind::PermissionDenied)).unwrap(),
            r#"{"code":-32002,"message":"Permission denied"}"#
        );
        let with_data = Fault::internal_error("boom")
            .with_data(Value::String("detail".into()))
            .to_error();
        assert_eq!(
            serde_json::to_string(&with_data).unwrap(),
            r#"{"code":-32603,"message":"boom","data":"detail"}"#
        );
    }

    #[test]
    fn fault_defaults_message_from_kind() {
        let fault = Fault::new(ErrorKind::MethodNotFound);
        assert_eq!(fault.message, "Method not found");
        assert_eq!(fault.kind.code(), -32601);
        assert!(fault.data.is_none());
        assert!(fault.request_id.is_none());
    }

    #[test]
    fn fault_round_trips_through_wire_error() {
        for code in DEFINED_CODES.iter() {
            let fault = Fault::new(ErrorKind::from(*code)).with_id(Some(Id::Num(7)));
            let revived = Fault::from_error(fault.to_error(), Some(Id::Num(7)));
            assert_eq!(revived, fault);
        }
    }
}
