use thiserror::Error;

use jsonrpc_parts_types::Fault;

/// The error type for client-side rpc operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A method call requires a non-empty method name. Raised before any
    /// request id is generated.
    #[error("JSON-RPC method call requires a method name")]
    EmptyMethod,

    /// A protocol fault, either raised while assembling/decoding locally
    /// or reconstructed from an error response.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// Json serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP error.
    #[cfg(feature = "http-tokio")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-200 status.
    #[cfg(feature = "http-tokio")]
    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}
