//! A JSON-RPC server library: a method registry, a dispatcher that turns
//! parsed request envelopes into protocol-conformant responses, and an
//! optional HTTP transport adapter built on hyper.
//!
//! The dispatcher is version-agnostic; the wire format is decided by the
//! [`Serializer`](jsonrpc_parts_types::codec::Serializer) passed in at
//! construction (2.0 by default, with batch support; 1.0 available for
//! legacy peers).
//!
//! # Usage
//!
//! ```rust
//! use jsonrpc_parts_server::{Application, MethodError};
//! use jsonrpc_parts_types::{Params, Value};
//!
//! let mut app = Application::default();
//! app.register("adder", |params: Option<Params>| {
//!     let args: Vec<i64> = match params {
//!         Some(params) => params.parse().map_err(MethodError::Fault)?,
//!         None => vec![],
//!     };
//!     Ok(Value::from(args.into_iter().sum::<i64>()))
//! });
//!
//! let response = app
//!     .handle_request_string(r#"{"jsonrpc":"2.0","method":"adder","params":[2,3],"id":1}"#)
//!     .unwrap();
//! assert_eq!(response, r#"{"jsonrpc":"2.0","result":5,"id":1}"#);
//! ```

#![deny(unused_imports)]
#![deny(missing_docs)]

mod application;
#[cfg(feature = "http-server")]
mod http;
mod registry;

pub use self::{
    application::Application,
    registry::{Method, MethodError, MethodRegistry},
};

#[cfg(feature = "http-server")]
pub use self::http::RpcService;
