use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::{
    codec::{AssembledRequest, ParsedRequests, ParsedResponses, RequestEnvelope, ResponseEnvelope, Serializer},
    error::{Error, ErrorKind, Fault},
    id::Id,
    params::Params,
    v1::{request::Request, response::Response},
};

/// JSON-RPC 1.0 message codec.
///
/// The legacy wire shape is `{"method","params","id"}` for requests and
/// `{"result","error","id"}` for responses, with `id: null` signifying a
/// notification. There is no batch mode in this generation; the error
/// object borrows the 2.0 shape since 1.0 never defined one.
#[derive(Debug)]
pub struct V1Codec {
    id: AtomicU64,
}

impl Default for V1Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl V1Codec {
    /// Creates a new 1.0 codec.
    pub fn new() -> Self {
        Self { id: AtomicU64::new(1) }
    }

    fn next_id(&self) -> Id {
        Id::Num(self.id.fetch_add(1, Ordering::AcqRel))
    }
}

impl Serializer for V1Codec {
    fn assemble_request(
        &self,
        method: &str,
        params: Option<Params>,
        notification: bool,
    ) -> Result<AssembledRequest, Fault> {
        let params = match params {
            None => vec![],
            Some(Params::Array(array)) => array,
            Some(Params::Map(_)) => {
                return Err(Fault::invalid_params("named parameters are not part of JSON-RPC 1.0"));
            }
        };
        let id = if notification { None } else { Some(self.next_id()) };
        let message =
            serde_json::to_value(Request::new(method, params, id.clone())).expect("`Request` is serializable");
        Ok(AssembledRequest { message, id })
    }

    fn assemble_response(&self, result: Value, id: Id) -> Value {
        serde_json::to_value(Response::success(result, id)).expect("`Response` is serializable")
    }

    fn assemble_error_response(&self, fault: &Fault) -> Value {
        let error = serde_json::to_value(fault.to_error()).expect("`Error` is serializable");
        serde_json::to_value(Response::failure(error, fault.request_id.clone())).expect("`Response` is serializable")
    }

    fn parse_request(&self, raw: &str) -> Result<ParsedRequests, Fault> {
        let message: Value = serde_json::from_str(raw).map_err(Fault::parse_error)?;
        if !message.is_object() {
            return Err(Fault::invalid_request("No valid RPC-package."));
        }
        let request: Request = serde_json::from_value(message)
            .map_err(|err| Fault::invalid_request(format!("Invalid request: {}", err)))?;
        Ok(ParsedRequests {
            items: vec![RequestEnvelope::Call {
                method: request.method,
                params: Some(Params::Array(request.params)),
                id: request.id,
            }],
            batch: false,
        })
    }

    fn parse_response(&self, raw: &str) -> Result<ParsedResponses, Fault> {
        let message: Value = serde_json::from_str(raw).map_err(Fault::parse_error)?;
        if !message.is_object() {
            return Err(Fault::invalid_request("No valid RPC-package."));
        }
        let response: Response = serde_json::from_value(message)
            .map_err(|err| Fault::invalid_request(format!("Invalid response: {}", err)))?;

        let item = match response.error {
            Some(error) => ResponseEnvelope::Failure(interpret_error(error, response.id)),
            None => ResponseEnvelope::Success {
                result: response.result.unwrap_or(Value::Null),
                id: response.id,
            },
        };
        Ok(ParsedResponses {
            items: vec![item],
            batch: false,
        })
    }
}

/// Resolves a non-null `error` member into the most specific fault.
///
/// The conventional shape is the 2.0 error object; anything else is kept
/// as a generic fault preserving the received value as data.
fn interpret_error(error: Value, id: Option<Id>) -> Fault {
    match serde_json::from_value::<Error>(error.clone()) {
        Ok(error) => Fault::from_error(error, id),
        Err(_) => Fault::from_error(
            Error {
                code: ErrorKind::ServerError(-1),
                message: "Error".to_owned(),
                data: Some(error),
            },
            id,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> V1Codec {
        V1Codec::new()
    }

    #[test]
    fn assemble_request_shapes() {
        let codec = codec();
        let request = codec
            .assemble_request("echo", Some(Params::Array(vec![Value::from(1)])), false)
            .unwrap();
        assert_eq!(request.message.to_string(), r#"{"method":"echo","params":[1],"id":1}"#);
        assert_eq!(request.id, Some(Id::Num(1)));

        let notification = codec.assemble_request("echo", None, true).unwrap();
        assert_eq!(
            notification.message.to_string(),
            r#"{"method":"echo","params":[],"id":null}"#
        );
        assert!(notification.id.is_none());
    }

    #[test]
    fn named_params_are_rejected() {
        let fault = codec()
            .assemble_request("echo", Some(Params::Map(Default::default())), false)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::InvalidParams);
    }

    #[test]
    fn request_round_trip() {
        let codec = codec();
        let request = codec
            .assemble_request("echo", Some(Params::Array(vec![Value::Bool(true)])), false)
            .unwrap();
        let parsed = codec.parse_request(&request.message.to_string()).unwrap();
        assert!(!parsed.batch);
        assert_eq!(
            parsed.items,
            vec![RequestEnvelope::Call {
                method: "echo".into(),
                params: Some(Params::Array(vec![Value::Bool(true)])),
                id: request.id,
            }]
        );
    }

    #[test]
    fn notification_parses_with_null_id() {
        let parsed = codec()
            .parse_request(r#"{"method":"ping","params":[],"id":null}"#)
            .unwrap();
        assert!(matches!(&parsed.items[0], RequestEnvelope::Call { id: None, .. }));
    }

    #[test]
    fn liberal_parse_fills_defaults_but_rejects_extras() {
        let codec = codec();

        let parsed = codec.parse_request(r#"{"method":"ping"}"#).unwrap();
        assert_eq!(
            parsed.items,
            vec![RequestEnvelope::Call {
                method: "ping".into(),
                params: Some(Params::Array(vec![])),
                id: None,
            }]
        );

        let fault = codec
            .parse_request(r#"{"method":"ping","params":[],"id":1,"extra":true}"#)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::InvalidRequest);
    }

    #[test]
    fn batch_arrays_are_not_part_of_v1() {
        let fault = codec()
            .parse_request(r#"[{"method":"ping","params":[],"id":1}]"#)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::InvalidRequest);
    }

    #[test]
    fn error_response_round_trip() {
        let codec = codec();
        let fault = Fault::new(ErrorKind::MethodNotFound).with_id(Some(Id::Num(3)));
        let wire = codec.assemble_error_response(&fault).to_string();
        assert_eq!(
            wire,
            r#"{"result":null,"error":{"code":-32601,"message":"Method not found"},"id":3}"#
        );

        let parsed = codec.parse_response(&wire).unwrap();
        match &parsed.items[0] {
            ResponseEnvelope::Failure(revived) => {
                assert_eq!(revived.kind, ErrorKind::MethodNotFound);
                assert_eq!(revived.request_id, Some(Id::Num(3)));
            }
            item => panic!("expected failure, got {:?}", item),
        }
    }

    #[test]
    fn unconventional_error_values_are_preserved() {
        let parsed = codec()
            .parse_response(r#"{"result":null,"error":"kaboom","id":1}"#)
            .unwrap();
        match &parsed.items[0] {
            ResponseEnvelope::Failure(fault) => {
                assert_eq!(fault.kind, ErrorKind::ServerError(-1));
                assert_eq!(fault.data, Some(Value::String("kaboom".into())));
            }
            item => panic!("expected failure, got {:?}", item),
        }
    }

    #[test]
    fn result_and_error_are_exclusive() {
        let fault = codec()
            .parse_response(r#"{"result":true,"error":{"code":-32700,"message":"Parse error"},"id":1}"#)
            .unwrap_err();
        assert_eq!(fault.kind, ErrorKind::InvalidRequest);
    }
}
