//! HTTP transport backed by `reqwest`.
//!
//! Every request is sent with basic authentication and `Accept: application/json`.
//! Non-2xx answers become [`TransportError::Status`] carrying the response body so
//! callers can surface the server's explanation.

use super::{ApiRequest, Method, Transport, TransportError};
use crate::client::ClientConfig;
use crate::error::{XldError, XldResult};
use log::{debug, trace};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

/// Transport talking to a live XL Deploy server.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Create a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> XldResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| XldError::configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Absolute URL for a request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let method = request.method();
        let path = request.path().to_string();
        let url = self.url_for(&path);

        debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method.into(), &url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(body) = request.body() {
            trace!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::network(method, &path, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::network(method, &path, e))?;

        if !status.is_success() {
            debug!("{} {} answered {}", method, url, status);
            return Err(TransportError::Status {
                method,
                path,
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        trace!("Response body: {}", text);
        serde_json::from_str(&text).map_err(|source| TransportError::decode(path, source))
    }
}
