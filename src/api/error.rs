use thiserror::Error;

use crate::network::TransportError;

/// Failures surfaced by [`ApiClient`](super::ApiClient) to page code
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 on a protected page. Navigation to the login page has already
    /// been issued when this is returned.
    #[error("Session expired")]
    SessionExpired,

    /// The backend answered but the envelope did not pass the success check
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request body could not be encoded, or a body could not be read
    /// into the requested type
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether a login redirect was issued while producing this error
    pub fn redirected(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}
