//! HTTP transport seam.
//!
//! `SupabaseClient` builds complete [`RestRequest`]s and hands them to a
//! [`Transport`]. The browser build sends them with `gloo-net`; tests swap in
//! a recording mock so every request the client makes can be asserted on
//! natively.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A fully described request relative to the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<String>,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), params: Vec::new(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v.as_str())
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Futures are not `Send` in the browser.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response was received.
    async fn send(&self, base_url: &str, request: RestRequest) -> Result<RestResponse, ApiError>;
}

/// `fetch`-backed transport. Outside the browser build every call fails with
/// [`ApiError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, base_url: &str, request: RestRequest) -> Result<RestResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = format!("{base_url}{}", request.path);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            builder = builder.query(request.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            let sent = match request.body {
                Some(body) => {
                    builder
                        .header("Content-Type", "application/json")
                        .body(body)
                        .map_err(|e| ApiError::Network(e.to_string()))?
                        .send()
                        .await
                }
                None => builder.send().await,
            };
            let resp = sent.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(RestResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base_url, request);
            Err(ApiError::Unavailable)
        }
    }
}
