//! Transport seam between the facade and the wire

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::HttpMethod;

/// A fully resolved request, ready to send
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

/// Status and raw body text of a completed exchange
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Error reading body: {0}")]
    Body(String),
    #[error("Request failed: {0}")]
    Other(String),
}

/// Sends one request and hands back the status plus body text.
///
/// Implementations must carry session cookies between calls.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError>;
}
