use serde_json::Value;

use crate::{error::Fault, id::Id, params::Params};

/// Parsed form of one incoming call.
///
/// Exactly one of the branches is populated per item: either the call was
/// well-formed, or a validation fault was trapped for it. An item-level
/// fault never aborts parsing of the rest of a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestEnvelope {
    /// A well-formed call. `id: None` marks a notification.
    Call {
        /// Name of the method to invoke.
        method: String,
        /// Positional or named arguments, absent when omitted on the wire.
        params: Option<Params>,
        /// Correlation id; `None` means the caller expects no reply.
        id: Option<Id>,
    },
    /// Parsing of this one item failed; the fault carries whatever id
    /// could be recovered from the malformed item.
    Invalid(Fault),
}

impl RequestEnvelope {
    /// Returns the correlation id of the item, if any was recovered.
    pub fn id(&self) -> Option<&Id> {
        match self {
            RequestEnvelope::Call { id, .. } => id.as_ref(),
            RequestEnvelope::Invalid(fault) => fault.request_id.as_ref(),
        }
    }
}

impl From<Fault> for RequestEnvelope {
    fn from(fault: Fault) -> Self {
        RequestEnvelope::Invalid(fault)
    }
}

/// Parsed form of one incoming response item.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEnvelope {
    /// The call succeeded.
    Success {
        /// The returned value (JSON null when the wire carried none).
        result: Value,
        /// Correlation id echoed from the request.
        id: Option<Id>,
    },
    /// The call failed, or the response item itself was malformed. The
    /// fault kind is the most specific one the error code resolves to.
    Failure(Fault),
}

impl ResponseEnvelope {
    /// Converts the envelope into a plain result.
    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            ResponseEnvelope::Success { result, .. } => Ok(result),
            ResponseEnvelope::Failure(fault) => Err(fault),
        }
    }

    /// Returns the correlation id of the item, if any was recovered.
    pub fn id(&self) -> Option<&Id> {
        match self {
            ResponseEnvelope::Success { id, .. } => id.as_ref(),
            ResponseEnvelope::Failure(fault) => fault.request_id.as_ref(),
        }
    }
}

/// The outcome of parsing a raw request message.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedRequests {
    /// The parsed items, in wire order.
    pub items: Vec<RequestEnvelope>,
    /// Whether the wire payload was a JSON array. A batch reply must be an
    /// array even when it holds a single response; a non-batch reply is
    /// the bare object.
    pub batch: bool,
}

/// The outcome of parsing a raw response message.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedResponses {
    /// The parsed items, in wire order.
    pub items: Vec<ResponseEnvelope>,
    /// Whether the wire payload was a JSON array.
    pub batch: bool,
}

/// An assembled outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledRequest {
    /// The wire-format object, ready to be serialized and sent.
    pub message: Value,
    /// The id generated for this call, `None` for notifications. Callers
    /// batching requests keep it to correlate the later response.
    pub id: Option<Id>,
}

/// Version-specific message codec.
///
/// One implementation exists per protocol generation. The codec is chosen
/// by the caller and passed explicitly into the dispatcher/client at
/// construction; everything above this trait is version-agnostic.
pub trait Serializer: Send + Sync {
    /// Builds a wire-format request object for `method`.
    ///
    /// A fresh id is generated per call unless `notification` is true.
    fn assemble_request(
        &self,
        method: &str,
        params: Option<Params>,
        notification: bool,
    ) -> Result<AssembledRequest, Fault>;

    /// Builds a wire-format success response carrying `result`.
    fn assemble_response(&self, result: Value, id: Id) -> Value;

    /// Builds a wire-format error response from a fault. The response id
    /// is the fault's `request_id` (null when none was recovered).
    fn assemble_error_response(&self, fault: &Fault) -> Value;

    /// Decodes a raw message string into request envelopes.
    ///
    /// Failures that concern the whole message (malformed JSON, wrong
    /// top-level shape) are returned as `Err`; per-item failures are
    /// trapped inside the envelopes.
    fn parse_request(&self, raw: &str) -> Result<ParsedRequests, Fault>;

    /// Decodes a raw message string into response envelopes, resolving
    /// wire error codes to their most specific fault kind.
    fn parse_response(&self, raw: &str) -> Result<ParsedResponses, Fault>;
}
