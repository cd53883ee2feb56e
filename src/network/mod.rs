//! Network layer - outbound HTTP to the metro backend
//!
//! The facade talks to a [`Transport`]; production code uses the
//! cookie-enabled reqwest client, tests script responses per endpoint.

pub mod client;
pub mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::ReqwestTransport;
pub use transport::{OutboundRequest, RawResponse, Transport, TransportError};
