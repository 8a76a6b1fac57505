mod builder;

use std::sync::Arc;

use jsonrpc_parts_types::{
    codec::{ResponseEnvelope, Serializer},
    Fault, Params, Value,
};

pub use self::builder::HttpClientBuilder;
use crate::{
    error::ClientError,
    transport::{BatchTransport, Transport},
};

/// HTTP JSON-RPC client.
///
/// The transport-bound variant of [`Client`](crate::Client): it POSTs
/// assembled requests as `application/json` and decodes the response body
/// through its codec, raising error responses as typed faults.
#[derive(Clone)]
pub struct HttpClient {
    url: String,
    http: reqwest::Client,
    codec: Arc<dyn Serializer>,
}

impl HttpClient {
    /// Creates a new HTTP JSON-RPC client with the given `url`.
    pub fn new<U: Into<String>>(url: U) -> Result<Self, ClientError> {
        HttpClientBuilder::new().build(url)
    }

    /// Creates an `HttpClientBuilder` to configure an `HttpClient`.
    ///
    /// This is the same as `HttpClientBuilder::new()`.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub(crate) fn from_parts(url: String, http: reqwest::Client, codec: Arc<dyn Serializer>) -> Self {
        Self { url, http, codec }
    }

    async fn send(&self, message: &Value) -> Result<reqwest::Response, ClientError> {
        log::debug!("Request: {}", message);
        let response = self.http.post(&self.url).json(message).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(response.status()));
        }
        Ok(response)
    }

    async fn send_for_body(&self, message: &Value) -> Result<String, ClientError> {
        let response = self.send(message).await?;
        let body = response.text().await?;
        log::debug!("Response: {}", body);
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Transport for HttpClient {
    async fn call(&self, method: &str, params: Option<Params>) -> Result<Value, ClientError> {
        let request = self.codec.assemble_request(method, params, false)?;
        let body = self.send_for_body(&request.message).await?;

        let parsed = self.codec.parse_response(&body)?;
        match parsed.items.into_iter().next() {
            Some(envelope) => Ok(envelope.into_result()?),
            None => Err(ClientError::Fault(Fault::invalid_request("empty response"))),
        }
    }

    async fn notify(&self, method: &str, params: Option<Params>) -> Result<(), ClientError> {
        let request = self.codec.assemble_request(method, params, true)?;
        self.send(&request.message).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BatchTransport for HttpClient {
    async fn call_batch(&self, batch: Vec<(String, Option<Params>)>) -> Result<Vec<ResponseEnvelope>, ClientError> {
        let mut messages = Vec::with_capacity(batch.len());
        for (method, params) in batch {
            messages.push(self.codec.assemble_request(&method, params, false)?.message);
        }
        let body = self.send_for_body(&Value::Array(messages)).await?;
        let parsed = self.codec.parse_response(&body)?;
        Ok(parsed.items)
    }
}
