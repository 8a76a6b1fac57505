use jsonrpc_parts_types::{
    codec::{ParsedResponses, Serializer},
    v2::V2Codec,
    Fault, Id, Params, Value,
};

use crate::error::ClientError;

/// The outcome of assembling a call through a [`Client`].
#[derive(Clone, Debug, PartialEq)]
pub enum Assembled {
    /// Outside a batch: the assembled wire object, to be sent by an
    /// external transport.
    Message(Value),
    /// Inside a batch: the call was buffered; this is the id it was
    /// assigned, for correlating it with the batched response later.
    Queued(Id),
}

/// Assembles outgoing requests and notifications, optionally buffering
/// them into a batch.
///
/// The wire format is decided by the codec passed in at construction
/// (2.0 by default). The client performs no I/O; pair it with a transport
/// or use [`HttpClient`](crate::HttpClient).
pub struct Client {
    codec: Box<dyn Serializer>,
    in_batch: bool,
    buffer: Vec<Value>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Box::new(V2Codec::new()))
    }
}

impl Client {
    /// Creates a client speaking the protocol generation of `codec`.
    pub fn new(codec: Box<dyn Serializer>) -> Self {
        Self {
            codec,
            in_batch: false,
            buffer: vec![],
        }
    }

    /// Assembles a method call expecting a reply.
    ///
    /// Argument validation happens before any request id is generated.
    pub fn call(&mut self, method: &str, params: Option<Params>) -> Result<Assembled, ClientError> {
        if method.is_empty() {
            return Err(ClientError::EmptyMethod);
        }
        let request = self.codec.assemble_request(method, params, false)?;
        if !self.in_batch {
            return Ok(Assembled::Message(request.message));
        }
        self.buffer.push(request.message);
        match request.id {
            Some(id) => Ok(Assembled::Queued(id)),
            None => Err(ClientError::Fault(Fault::internal_error(
                "codec assembled a call without an id",
            ))),
        }
    }

    /// Assembles a notification (no id, no reply expected).
    ///
    /// Returns the assembled wire object, or `None` when it was buffered
    /// into the active batch.
    pub fn notify(&mut self, method: &str, params: Option<Params>) -> Result<Option<Value>, ClientError> {
        if method.is_empty() {
            return Err(ClientError::EmptyMethod);
        }
        let request = self.codec.assemble_request(method, params, true)?;
        if self.in_batch {
            self.buffer.push(request.message);
            Ok(None)
        } else {
            Ok(Some(request.message))
        }
    }

    /// Enters batch mode, clearing any previously buffered requests.
    pub fn begin_batch(&mut self) {
        self.in_batch = true;
        self.buffer.clear();
    }

    /// Leaves batch mode, draining and returning the buffered requests in
    /// the order they were assembled.
    pub fn end_batch(&mut self) -> Vec<Value> {
        self.in_batch = false;
        std::mem::take(&mut self.buffer)
    }

    /// The requests buffered so far, while a batch scope is active.
    pub fn batched(&self) -> &[Value] {
        if self.in_batch {
            &self.buffer
        } else {
            &[]
        }
    }

    /// Whether a batch scope is active.
    pub fn in_batch(&self) -> bool {
        self.in_batch
    }

    /// Decodes a raw response message with this client's codec.
    pub fn parse_response(&self, raw: &str) -> Result<ParsedResponses, Fault> {
        self.codec.parse_response(raw)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("in_batch", &self.in_batch)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
