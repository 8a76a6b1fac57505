use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use crate::{
    codec::{AssembledRequest, ParsedRequests, ParsedResponses, RequestEnvelope, ResponseEnvelope, Serializer},
    error::{Error, ErrorKind, Fault},
    id::Id,
    params::Params,
    v2::{request::MethodCall, request::Notification, response::Failure, response::Success},
};

/// JSON-RPC 2.0 message codec.
///
/// Request ids are drawn from an atomic counter owned by the codec, one
/// per assembled non-notification request.
#[derive(Debug)]
pub struct V2Codec {
    id: AtomicU64,
}

impl Default for V2Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl V2Codec {
    /// Creates a new 2.0 codec.
    pub fn new() -> Self {
        Self { id: AtomicU64::new(1) }
    }

    fn next_id(&self) -> Id {
        Id::Num(self.id.fetch_add(1, Ordering::AcqRel))
    }
}

impl Serializer for V2Codec {
    fn assemble_request(
        &self,
        method: &str,
        params: Option<Params>,
        notification: bool,
    ) -> Result<AssembledRequest, Fault> {
        // empty params are omitted from the wire entirely
        let params = params.filter(|params| !params.is_empty());
        if notification {
            let message = serde_json::to_value(Notification::new(method, params))
                .expect("`Notification` is serializable");
            Ok(AssembledRequest { message, id: None })
        } else {
            let id = self.next_id();
            let message = serde_json::to_value(MethodCall::new(method, params, id.clone()))
                .expect("`MethodCall` is serializable");
            Ok(AssembledRequest { message, id: Some(id) })
        }
    }

    fn assemble_response(&self, result: Value, id: Id) -> Value {
        serde_json::to_value(Success::new(result, id)).expect("`Success` is serializable")
    }

    fn assemble_error_response(&self, fault: &Fault) -> Value {
        serde_json::to_value(Failure::new(fault.to_error(), fault.request_id.clone()))
            .expect("`Failure` is serializable")
    }

    fn parse_request(&self, raw: &str) -> Result<ParsedRequests, Fault> {
        let message: Value = serde_json::from_str(raw).map_err(Fault::parse_error)?;
        match message {
            Value::Array(items) if !items.is_empty() => Ok(ParsedRequests {
                items: items.iter().map(parse_call).collect(),
                batch: true,
            }),
            message @ Value::Object(_) => Ok(ParsedRequests {
                items: vec![parse_call(&message)],
                batch: false,
            }),
            _ => Err(Fault::invalid_request(
                "Neither a batch array nor a single request object found in the request.",
            )),
        }
    }

    fn parse_response(&self, raw: &str) -> Result<ParsedResponses, Fault> {
        let message: Value = serde_json::from_str(raw).map_err(Fault::parse_error)?;
        match message {
            Value::Array(items) if !items.is_empty() => Ok(ParsedResponses {
                items: items.iter().map(parse_output).collect(),
                batch: true,
            }),
            message @ Value::Object(_) => Ok(ParsedResponses {
                items: vec![parse_output(&message)],
                batch: false,
            }),
            _ => Err(Fault::new(ErrorKind::ParseError).with_message(
                "Neither a batch array nor a single response object found in the response.",
            )),
        }
    }
}

/// Parses one batch element, trapping validation faults into the envelope.
fn parse_call(item: &Value) -> RequestEnvelope {
    let object = match item.as_object() {
        Some(object) => object,
        None => return Fault::invalid_request("No valid request object.").into(),
    };
    // capture whatever id is recoverable first, so faults can carry it
    let id = lenient_id(object);
    match validate_call(object, &id) {
        Ok((method, params)) => RequestEnvelope::Call { method, params, id },
        Err(fault) => RequestEnvelope::Invalid(fault),
    }
}

fn validate_call(object: &Map<String, Value>, id: &Option<Id>) -> Result<(String, Option<Params>), Fault> {
    let version = required_str(object, "jsonrpc", id)?;
    if version != "2.0" {
        return Err(Fault::invalid_request("Invalid jsonrpc version.").with_id(id.clone()));
    }
    let method = required_str(object, "method", id)?.to_owned();
    let params = match object.get("params") {
        None => None,
        Some(value) => Some(serde_json::from_value::<Params>(value.clone()).map_err(|_| {
            Fault::invalid_params("\"params\" must be an array or an object.").with_id(id.clone())
        })?),
    };
    Ok((method, params))
}

/// Parses one response element, trapping validation faults and resolving
/// wire error codes to their most specific fault kind.
fn parse_output(item: &Value) -> ResponseEnvelope {
    match validate_output(item) {
        Ok(envelope) => envelope,
        Err(fault) => ResponseEnvelope::Failure(fault),
    }
}

fn validate_output(item: &Value) -> Result<ResponseEnvelope, Fault> {
    let object = item
        .as_object()
        .ok_or_else(|| Fault::invalid_request("No valid response object."))?;
    if !object.contains_key("id") {
        return Err(Fault::invalid_request("Invalid response, \"id\" missing."));
    }
    let id = lenient_id(object);
    let version = required_str(object, "jsonrpc", &id)?;
    if version != "2.0" {
        return Err(Fault::invalid_request("Invalid jsonrpc version.").with_id(id.clone()));
    }

    let error = object.get("error").filter(|value| !value.is_null());
    let result = object.get("result").filter(|value| !value.is_null());
    if error.is_some() && result.is_some() {
        return Err(
            Fault::invalid_request("Invalid response, only \"result\" or \"error\" allowed.").with_id(id.clone()),
        );
    }

    if let Some(error) = error {
        let error = parse_error_object(error, &id)?;
        return Err(Fault::from_error(error, id));
    }
    Ok(ResponseEnvelope::Success {
        result: result.cloned().unwrap_or(Value::Null),
        id,
    })
}

fn parse_error_object(error: &Value, id: &Option<Id>) -> Result<Error, Fault> {
    let invalid = || Fault::invalid_request("Invalid response, invalid error object.").with_id(id.clone());
    let object = error.as_object().ok_or_else(invalid)?;
    let code = object.get("code").and_then(Value::as_i64);
    let message = object.get("message").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => Ok(Error {
            code: ErrorKind::from(code),
            message: message.to_owned(),
            data: object.get("data").cloned(),
        }),
        _ => Err(invalid()),
    }
}

fn lenient_id(object: &Map<String, Value>) -> Option<Id> {
    object.get("id").and_then(|id| serde_json::from_value::<Id>(id.clone()).ok())
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str, id: &Option<Id>) -> Result<&'a str, Fault> {
    match object.get(key) {
        None => Err(Fault::invalid_request(format!("Argument \"{}\" missing.", key)).with_id(id.clone())),
        Some(Value::String(value)) => Ok(value),
        Some(_) => {
            Err(Fault::invalid_request(format!("Value of argument \"{}\" must be a string.", key)).with_id(id.clone()))
        }
    }
}
