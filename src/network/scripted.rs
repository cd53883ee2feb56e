//! Scripted transport for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::network::transport::{OutboundRequest, RawResponse, Transport, TransportError};

/// Answers each URL path suffix with a canned status and body, and records
/// every request it sees. Unscripted paths fail as connection errors.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, RawResponse>>,
    sent: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, endpoint: &str, status: u16, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            endpoint.to_string(),
            RawResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub(crate) fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        let found = routes
            .iter()
            .find(|(endpoint, _)| request.url.ends_with(endpoint.as_str()))
            .map(|(_, resp)| resp.clone());
        found.ok_or_else(|| TransportError::Connect(format!("no route for {}", request.url)))
    }
}
