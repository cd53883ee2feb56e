//! API client facade
//!
//! Single point of outbound communication with the metro backend. A client is
//! built per page load: it knows the page's [`PageRole`], carries the session
//! cookie through its transport, and turns raw responses into either a body
//! the page can use or an [`ApiError`]. Authentication failures may navigate
//! away from the page as part of handling the response.

mod auth;
mod error;

pub use error::ApiError;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::constants::{FALLBACK_ERROR, LOGIN_ENDPOINT};
use crate::models::{is_truthy, ApiResponse, HttpMethod};
use crate::navigation::{Navigator, Page, PageRole};
use crate::network::{OutboundRequest, Transport};
use crate::storage::LocalStore;

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    role: PageRole,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    store: Arc<dyn LocalStore>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        role: PageRole,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        store: Arc<dyn LocalStore>,
    ) -> Self {
        ApiClient {
            config: Arc::new(config),
            role,
            transport,
            navigator,
            store,
        }
    }

    /// Same transport, navigator and store for a newly loaded page
    pub fn for_page(&self, role: PageRole) -> Self {
        ApiClient {
            role,
            ..self.clone()
        }
    }

    pub fn role(&self) -> PageRole {
        self.role
    }

    /// Issue a request and interpret the response.
    ///
    /// A 401 outside the login endpoint redirects to the login page when the
    /// current page is protected (returning [`ApiError::SessionExpired`]), and
    /// otherwise yields a synthetic `{success: false, error: "Not logged in"}`.
    /// Any other response must have a truthy `success`, `message` or `token`,
    /// or it becomes [`ApiError::Server`].
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = OutboundRequest {
            method,
            url: self.config.url_for(endpoint),
            body,
        };
        let raw = self.transport.send(request).await?;

        let data = ApiResponse::parse(&raw.body).unwrap_or_else(|| {
            tracing::warn!(
                endpoint,
                status = raw.status,
                "Response is not a JSON object, using empty payload"
            );
            ApiResponse::default()
        });

        if raw.status == 401 {
            return self.unauthorized(endpoint, data);
        }

        if !data.passes_success_check() {
            // Non-string errors are shown in their JSON form
            let message = data
                .get("error")
                .filter(|v| is_truthy(v))
                .map_or_else(
                    || FALLBACK_ERROR.to_string(),
                    |v| v.as_str().map_or_else(|| v.to_string(), str::to_string),
                );
            tracing::debug!(endpoint, status = raw.status, %message, "Request failed");
            return Err(ApiError::Server {
                status: raw.status,
                message,
            });
        }

        Ok(data)
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, ApiError> {
        self.call(endpoint, HttpMethod::GET, None).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&T>,
    ) -> Result<ApiResponse, ApiError> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.call(endpoint, HttpMethod::POST, body).await
    }

    fn unauthorized(&self, endpoint: &str, data: ApiResponse) -> Result<ApiResponse, ApiError> {
        if is_login_endpoint(endpoint) {
            return Ok(data);
        }

        match self.role {
            PageRole::Protected => {
                tracing::info!(endpoint, "Session rejected on protected page");
                self.navigator.navigate(Page::Login);
                Err(ApiError::SessionExpired)
            }
            PageRole::Auth | PageRole::Landing | PageRole::Public => {
                Ok(ApiResponse::not_logged_in())
            }
        }
    }
}

fn is_login_endpoint(endpoint: &str) -> bool {
    endpoint.trim_start_matches('/') == LOGIN_ENDPOINT.trim_start_matches('/')
}
