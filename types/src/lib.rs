//! Types and codecs for the JSON-RPC message protocol as defined in the
//! [JSON-RPC 1.0 spec](https://www.jsonrpc.org/specification_v1) and
//! [JSON-RPC 2.0 spec](https://www.jsonrpc.org/specification).
//!
//! The crate is split in two layers:
//!
//! * plain wire types (`v1`, `v2` modules) that serialize/deserialize with
//!   the exact field shapes each protocol generation prescribes, and
//! * the [`Serializer`](codec::Serializer) strategy with one implementation
//!   per generation ([`V1Codec`](v1::V1Codec), [`V2Codec`](v2::V2Codec)),
//!   which parses raw message strings into validated envelopes, trapping
//!   per-item failures so that one bad element never poisons a batch.
//!
//! # Usage
//!
//! ## Assembling and parsing a JSON-RPC 2.0 request
//!
//! ```rust
//! use jsonrpc_parts_types::{codec::{RequestEnvelope, Serializer}, v2::V2Codec, Params};
//!
//! let codec = V2Codec::new();
//! let request = codec
//!     .assemble_request("foo", Some(Params::Array(vec![1.into(), true.into()])), false)
//!     .unwrap();
//! assert!(request.id.is_some());
//!
//! let parsed = codec.parse_request(&request.message.to_string()).unwrap();
//! assert!(!parsed.batch);
//! match &parsed.items[0] {
//!     RequestEnvelope::Call { method, id, .. } => {
//!         assert_eq!(method, "foo");
//!         assert_eq!(id.as_ref(), request.id.as_ref());
//!     }
//!     RequestEnvelope::Invalid(fault) => panic!("unexpected fault: {}", fault),
//! }
//! ```
//!
//! ## Resolving wire error codes
//!
//! ```rust
//! use jsonrpc_parts_types::ErrorKind;
//!
//! assert_eq!(ErrorKind::from(-32601), ErrorKind::MethodNotFound);
//! assert_eq!(ErrorKind::MethodNotFound.code(), -32601);
//! // unknown codes round-trip unchanged
//! assert_eq!(ErrorKind::from(-31999).code(), -31999);
//! ```

#![deny(unused_imports)]
#![deny(missing_docs)]

/// Message codecs: parsed envelopes and the per-version serializer strategy.
pub mod codec;
mod error;
mod id;
mod params;
/// JSON-RPC 1.0 types and codec.
pub mod v1;
/// JSON-RPC 2.0 types and codec.
pub mod v2;

pub use self::{
    error::{Error, ErrorKind, Fault},
    id::Id,
    params::Params,
};

// Re-exports
pub use serde_json::{Map, Value};
