//! A JSON-RPC client library, the caller-side mirror of the dispatcher:
//! it assembles outgoing requests and notifications, optionally buffers
//! them into a batch, parses responses, and reconstructs wire errors as
//! typed faults.
//!
//! [`Client`] is transport-free: it hands back assembled wire objects for
//! the caller to send however it likes. [`HttpClient`] (feature
//! `http-tokio`, default) additionally performs the HTTP round trip and
//! raises error responses as [`ClientError::Fault`].
//!
//! # Usage
//!
//! ```rust
//! use jsonrpc_parts_client::{Assembled, Client};
//! use jsonrpc_parts_types::Params;
//!
//! let mut client = Client::default();
//!
//! // outside a batch, the assembled message is returned directly
//! let message = client.call("adder", Some(Params::Array(vec![2.into(), 3.into()]))).unwrap();
//! assert!(matches!(message, Assembled::Message(_)));
//!
//! // inside a batch, calls are buffered and yield their correlation id
//! client.begin_batch();
//! let id = client.call("adder", None).unwrap();
//! assert!(matches!(id, Assembled::Queued(_)));
//! let batch = client.end_batch();
//! assert_eq!(batch.len(), 1);
//! ```

#![deny(unused_imports)]
#![deny(missing_docs)]

mod client;
mod error;
#[cfg(feature = "http-tokio")]
mod http_client;
mod transport;

pub use self::{
    client::{Assembled, Client},
    error::ClientError,
    transport::{BatchTransport, Transport},
};

#[cfg(feature = "http-tokio")]
pub use self::http_client::{HttpClient, HttpClientBuilder};
