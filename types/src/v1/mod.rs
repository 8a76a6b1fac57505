mod codec;
/// JSON-RPC 1.0 request objects.
pub mod request;
/// JSON-RPC 1.0 response objects.
pub mod response;

pub use self::{codec::V1Codec, request::Request, response::Response};
