use jsonrpc_parts_types::{codec::ResponseEnvelope, Params, Value};

use crate::error::ClientError;

/// A transport that performs the actual send/receive for a JSON-RPC call.
#[async_trait::async_trait]
pub trait Transport {
    /// Sends a method call and returns the bare `result` value.
    ///
    /// An error response is reconstructed as the most specific known
    /// fault and raised as [`ClientError::Fault`] instead of returned.
    async fn call(&self, method: &str, params: Option<Params>) -> Result<Value, ClientError>;

    /// Sends a notification; the response body, if any, is ignored.
    async fn notify(&self, method: &str, params: Option<Params>) -> Result<(), ClientError>;
}

/// A transport supporting batch requests.
#[async_trait::async_trait]
pub trait BatchTransport: Transport {
    /// Sends a batch of method calls and returns the parsed response
    /// items in wire order.
    async fn call_batch(&self, batch: Vec<(String, Option<Params>)>) -> Result<Vec<ResponseEnvelope>, ClientError>;
}
