use std::{sync::Arc, time::Duration};

use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use jsonrpc_parts_types::{codec::Serializer, v2::V2Codec};

use super::HttpClient;
use crate::error::ClientError;

/// A builder for [`HttpClient`].
pub struct HttpClientBuilder {
    headers: HeaderMap,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    codec: Option<Arc<dyn Serializer>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Creates a new `HttpClientBuilder`.
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            timeout: None,
            connect_timeout: None,
            codec: None,
        }
    }

    /// Enables basic authentication.
    pub fn basic_auth<U, P>(mut self, username: U, password: Option<P>) -> Self
    where
        U: std::fmt::Display,
        P: std::fmt::Display,
    {
        let auth = match password {
            Some(password) => base64::encode(format!("{}:{}", username, password)),
            None => base64::encode(format!("{}:", username)),
        };
        let mut value = HeaderValue::from_str(&format!("Basic {}", auth)).expect("base64 output is visible ascii");
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        self
    }

    /// Enables bearer authentication.
    pub fn bearer_auth<T: std::fmt::Display>(mut self, token: T) -> Self {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", token)).expect("token must be visible ascii");
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        self
    }

    /// Adds a header to every request.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds all given headers to every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Enables a total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables a timeout for only the connect phase.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the wire codec; 2.0 is used when none is given.
    pub fn codec(mut self, codec: Arc<dyn Serializer>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Builds an `HttpClient` that posts to the given `url`.
    pub fn build<U: Into<String>>(self, url: U) -> Result<HttpClient, ClientError> {
        let mut builder = reqwest::Client::builder().default_headers(self.headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;
        let codec = self.codec.unwrap_or_else(|| Arc::new(V2Codec::new()));
        Ok(HttpClient::from_parts(url.into(), http, codec))
    }
}

impl std::fmt::Debug for HttpClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientBuilder")
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_basic_auth() {
        let builder = HttpClientBuilder::new().basic_auth("user", Some("pass"));
        let auth = builder.headers.get(header::AUTHORIZATION).unwrap();
        assert_eq!(auth, &HeaderValue::from_static("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn http_basic_auth_without_password() {
        let builder = HttpClientBuilder::new().basic_auth("user", None::<&str>);
        let auth = builder.headers.get(header::AUTHORIZATION).unwrap();
        assert_eq!(auth, &HeaderValue::from_static("Basic dXNlcjo="));
    }

    #[test]
    fn http_bearer_auth() {
        let builder = HttpClientBuilder::new().bearer_auth("token");
        let auth = builder.headers.get(header::AUTHORIZATION).unwrap();
        assert_eq!(auth, &HeaderValue::from_static("Bearer token"));
    }
}
