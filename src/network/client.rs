//! HTTP client wrapper - executes requests against the backend

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::models::HttpMethod;
use crate::network::transport::{OutboundRequest, RawResponse, Transport, TransportError};

/// Build a request from the given parameters
fn build_request(client: &reqwest::Client, request: &OutboundRequest) -> reqwest::RequestBuilder {
    let req_builder = match request.method {
        HttpMethod::GET => client.get(&request.url),
        HttpMethod::POST => client.post(&request.url),
        HttpMethod::PUT => client.put(&request.url),
        HttpMethod::PATCH => client.patch(&request.url),
        HttpMethod::DELETE => client.delete(&request.url),
    };

    let req_builder = req_builder
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(reqwest::header::ACCEPT, "application/json");

    match &request.body {
        Some(body) => req_builder.json(body),
        None => req_builder,
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

/// Cookie-enabled reqwest transport.
///
/// Cloning shares the cookie jar, so one session survives across page loads.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Self {
        ReqwestTransport {
            client: create_client(config.request_timeout()),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        tracing::debug!(url = %request.url, method = request.method.as_str(), "Sending request");
        let resp = build_request(&self.client, &request)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        tracing::debug!(url = %request.url, status, "Request completed");

        Ok(RawResponse { status, body })
    }
}

/// Create an HTTP client with a cookie store. No timeout unless a non-zero one is configured.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder().cookie_store(true);
    if let Some(timeout) = timeout.filter(|t| !t.is_zero()) {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}
