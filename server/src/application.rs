use std::sync::Arc;

use jsonrpc_parts_types::{
    codec::{RequestEnvelope, Serializer},
    v2::V2Codec,
    Fault, Params, Value,
};

use crate::registry::{Method, MethodError, MethodRegistry};

/// The dispatcher: owns a method registry and a message codec, and turns
/// raw request strings into protocol-conformant response strings.
///
/// Every failure path resolves to a returned/serialized value; nothing
/// that happens while processing a request can surface to the transport
/// as anything but JSON.
pub struct Application {
    registry: MethodRegistry,
    codec: Box<dyn Serializer>,
}

impl Default for Application {
    fn default() -> Self {
        Self::new(Box::new(V2Codec::new()))
    }
}

impl Application {
    /// Creates a dispatcher speaking the protocol generation of `codec`.
    pub fn new(codec: Box<dyn Serializer>) -> Self {
        Self {
            registry: MethodRegistry::new(),
            codec,
        }
    }

    /// The method registry.
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Mutable access to the method registry.
    pub fn registry_mut(&mut self) -> &mut MethodRegistry {
        &mut self.registry
    }

    /// Registers a function or closure under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(Option<Params>) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        self.registry.register(name, method);
    }

    /// Registers a whole set of `(name, method)` pairs at once.
    pub fn register_all<I>(&mut self, methods: I)
    where
        I: IntoIterator<Item = (String, Arc<dyn Method>)>,
    {
        self.registry.register_all(methods);
    }

    /// Turns a sequence of request envelopes into wire-format response
    /// objects, in input order.
    ///
    /// Notifications (items without an id) never produce a response entry,
    /// whatever their outcome; dropped notifications leave no gap marker.
    pub fn process_requests(&self, requests: Vec<RequestEnvelope>) -> Vec<Value> {
        let mut responses = Vec::new();
        for request in requests {
            let (method, params, id) = match request {
                RequestEnvelope::Invalid(fault) => {
                    // a malformed notification gets no reply at all
                    if fault.request_id.is_some() {
                        responses.push(self.codec.assemble_error_response(&fault));
                    }
                    continue;
                }
                RequestEnvelope::Call { method, params, id } => (method, params, id),
            };

            let registered = match self.registry.get(&method) {
                Some(registered) => registered,
                None => {
                    if let Some(id) = id {
                        responses
                            .push(self.codec.assemble_error_response(&Fault::method_not_found(&method).with_id(Some(id))));
                    }
                    continue;
                }
            };

            match (registered.call(params), id) {
                // a notification's side effects are fire-and-forget
                (_, None) => {}
                (Ok(result), Some(id)) => responses.push(self.codec.assemble_response(result, id)),
                (Err(MethodError::Fault(fault)), Some(id)) => {
                    responses.push(self.codec.assemble_error_response(&fault.with_id(Some(id))));
                }
                (Err(MethodError::Other(err)), Some(id)) => {
                    log::warn!("method \"{}\" failed: {}", method, err);
                    let fault = Fault::internal_error(err.to_string())
                        .with_data(Value::String(format!(
                            "While processing method \"{}\": {}",
                            method, err
                        )))
                        .with_id(Some(id));
                    responses.push(self.codec.assemble_error_response(&fault));
                }
            }
        }
        responses
    }

    /// Handles one raw request message, returning the raw response message.
    ///
    /// Returns `None` when no response is due (the message contained only
    /// notifications); the transport maps that to an empty body. A batch
    /// request is answered with a JSON array even when only one response
    /// resulted; a single request is answered with the bare object.
    pub fn handle_request_string(&self, raw: &str) -> Option<String> {
        let parsed = match self.codec.parse_request(raw) {
            Ok(parsed) => parsed,
            Err(fault) => {
                return Some(self.finalize(self.codec.assemble_error_response(&fault)));
            }
        };

        let responses = self.process_requests(parsed.items);
        if parsed.batch {
            if responses.is_empty() {
                None
            } else {
                Some(self.finalize(Value::Array(responses)))
            }
        } else {
            responses.into_iter().next().map(|single| self.finalize(single))
        }
    }

    /// Serializes the final response value; a failure at this last step is
    /// itself downgraded to a serialized InternalError response so the
    /// transport never sees an error.
    fn finalize(&self, message: Value) -> String {
        match serde_json::to_string(&message) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("failed to serialize response: {}", err);
                let fault = Fault::internal_error(err.to_string());
                self.codec.assemble_error_response(&fault).to_string()
            }
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application").field("registry", &self.registry).finish()
    }
}

#[cfg(test)]
mod tests {
    use jsonrpc_parts_types::{v1::V1Codec, ErrorKind, Id};

    use super::*;

    fn app() -> Application {
        let mut app = Application::default();
        app.register("adder", |params: Option<Params>| {
            let args: Vec<i64> = match params {
                Some(params) => params.parse().map_err(MethodError::Fault)?,
                None => vec![],
            };
            Ok(Value::from(args.into_iter().sum::<i64>()))
        });
        app.register("blow_up", |_params: Option<Params>| {
            Err(MethodError::from("Blowing up on command"))
        });
        app.register("reject", |_params: Option<Params>| {
            Err(MethodError::Fault(Fault::new(ErrorKind::PermissionDenied)))
        });
        app
    }

    fn codec() -> V2Codec {
        V2Codec::new()
    }

    #[test]
    fn batch_of_calls_is_answered_in_order() {
        let codec = codec();
        let first = codec
            .assemble_request("adder", Some(Params::Array(vec![2.into(), 3.into()])), false)
            .unwrap();
        let second = codec
            .assemble_request("adder", Some(Params::Array(vec![4.into(), 3.into()])), false)
            .unwrap();
        let third = codec.assemble_request("adder", None, false).unwrap();
        let raw = Value::Array(vec![
            first.message.clone(),
            second.message.clone(),
            third.message.clone(),
        ])
        .to_string();

        let parsed = codec.parse_request(&raw).unwrap();
        let responses = app().process_requests(parsed.items);

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["result"], Value::from(5));
        assert_eq!(responses[0]["id"], first.message["id"]);
        assert_eq!(responses[1]["result"], Value::from(7));
        assert_eq!(responses[1]["id"], second.message["id"]);
        assert_eq!(responses[2]["result"], Value::from(0));
        assert_eq!(responses[2]["id"], third.message["id"]);
    }

    #[test]
    fn raising_method_is_downgraded_to_internal_error() {
        let app = app();
        let response = app
            .handle_request_string(r#"{"jsonrpc":"2.0","method":"blow_up","id":"x1"}"#)
            .unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();

        assert_eq!(response["error"]["code"], Value::from(-32603));
        assert_eq!(response["error"]["message"], Value::from("Blowing up on command"));
        let data = response["error"]["data"].as_str().unwrap();
        assert!(data.contains("Blowing up on command"));
        assert_eq!(response["id"], Value::from("x1"));
    }

    #[test]
    fn application_faults_are_forwarded_intact() {
        let app = app();
        let response = app
            .handle_request_string(r#"{"jsonrpc":"2.0","method":"reject","id":1}"#)
            .unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["error"]["code"], Value::from(-32002));
        assert_eq!(response["id"], Value::from(1));
    }

    #[test]
    fn unknown_method_with_id_gets_method_not_found() {
        let app = app();
        let response = app
            .handle_request_string(r#"{"jsonrpc":"2.0","method":"ghost","id":"x1"}"#)
            .unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["error"]["code"], Value::from(-32601));
        assert_eq!(response["id"], Value::from("x1"));
    }

    #[test]
    fn notifications_are_silent_whatever_happens() {
        let app = app();
        // unknown method, failing method, succeeding method: all notifications
        let raw = r#"[
            {"jsonrpc":"2.0","method":"ghost"},
            {"jsonrpc":"2.0","method":"blow_up"},
            {"jsonrpc":"2.0","method":"adder","params":[1,2]}
        ]"#;
        assert_eq!(app.handle_request_string(raw), None);
    }

    #[test]
    fn per_item_isolation_in_a_batch() {
        let app = app();
        let raw = r#"[
            {"jsonrpc":"2.0","method":"adder","params":[2,3],"id":1},
            {"jsonrpc":"1.0","method":"adder","id":2},
            {"jsonrpc":"2.0","method":"blow_up","id":3},
            {"jsonrpc":"2.0","method":"adder","params":[4,3],"id":4}
        ]"#;
        let response = app.handle_request_string(raw).unwrap();
        let responses: Vec<Value> = serde_json::from_str(&response).unwrap();

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["result"], Value::from(5));
        assert_eq!(responses[1]["error"]["code"], Value::from(-32600));
        assert_eq!(responses[1]["id"], Value::from(2));
        assert_eq!(responses[2]["error"]["code"], Value::from(-32603));
        assert_eq!(responses[3]["result"], Value::from(7));
        assert_eq!(responses[3]["id"], Value::from(4));
    }

    #[test]
    fn malformed_notification_gets_no_reply_but_malformed_call_does() {
        let app = app();
        let raw = r#"[
            {"jsonrpc":"1.0","method":"adder"},
            {"jsonrpc":"1.0","method":"adder","id":9}
        ]"#;
        let response = app.handle_request_string(raw).unwrap();
        let responses: Vec<Value> = serde_json::from_str(&response).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], Value::from(-32600));
        assert_eq!(responses[0]["id"], Value::from(9));
    }

    #[test]
    fn batch_of_one_is_answered_with_an_array() {
        let app = app();
        let response = app
            .handle_request_string(r#"[{"jsonrpc":"2.0","method":"adder","params":[2,3],"id":1}]"#)
            .unwrap();
        assert!(response.starts_with('['));

        let response = app
            .handle_request_string(r#"{"jsonrpc":"2.0","method":"adder","params":[2,3],"id":1}"#)
            .unwrap();
        assert!(response.starts_with('{'));
    }

    #[test]
    fn malformed_json_yields_a_single_parse_error_response() {
        let app = app();
        let response = app.handle_request_string(r#"{"jsonrpc": oops"#).unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["error"]["code"], Value::from(-32700));
        assert_eq!(response["id"], Value::Null);
    }

    #[test]
    fn empty_batch_is_invalid() {
        let app = app();
        let response = app.handle_request_string("[]").unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["error"]["code"], Value::from(-32600));
    }

    #[test]
    fn v1_application_speaks_the_legacy_shape() {
        let mut app = Application::new(Box::new(V1Codec::new()));
        app.register("echo", |params: Option<Params>| {
            Ok(params.map(Value::from).unwrap_or(Value::Null))
        });

        let response = app
            .handle_request_string(r#"{"method":"echo","params":[1,2],"id":1}"#)
            .unwrap();
        assert_eq!(response, r#"{"result":[1,2],"error":null,"id":1}"#);

        // v1 notification: id null, no reply
        assert_eq!(
            app.handle_request_string(r#"{"method":"echo","params":[],"id":null}"#),
            None
        );
    }

    #[test]
    fn ids_survive_unchanged() {
        let app = app();
        let response = app
            .handle_request_string(r#"{"jsonrpc":"2.0","method":"adder","params":[1],"id":"corr-7"}"#)
            .unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["id"], Value::from("corr-7"));
        // the typed view agrees
        let id: Id = serde_json::from_value(response["id"].clone()).unwrap();
        assert_eq!(id, Id::Str("corr-7".into()));
    }
}
