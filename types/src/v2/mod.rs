mod codec;
/// JSON-RPC 2.0 request objects.
pub mod request;
/// JSON-RPC 2.0 response objects.
pub mod response;
mod version;

pub use self::{
    codec::V2Codec,
    request::{MethodCall, Notification},
    response::{Failure, Success},
    version::Version,
};
