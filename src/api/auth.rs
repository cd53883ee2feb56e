//! Session operations built on top of [`ApiClient::call`]

use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::constants::{
    CHANGE_PASSWORD_ENDPOINT, HEALTH_ENDPOINT, LOGGED_IN_FLAG, LOGIN_ENDPOINT, LOGOUT_ENDPOINT,
    ME_ENDPOINT, REGISTER_ENDPOINT,
};
use crate::models::{ApiResponse, Credentials, HealthStatus, PasswordChange, User};
use crate::navigation::{Page, PageRole};

impl ApiClient {
    /// Gate for pages that must not render without a session.
    ///
    /// Returns the user, or navigates to the login page and returns `None`.
    pub async fn require_auth(&self) -> Option<User> {
        match self.get(ME_ENDPOINT).await {
            Ok(resp) if resp.is_success() => {
                if let Some(user) = resp.user() {
                    return Some(user);
                }
                tracing::warn!("Session check succeeded without a user record");
            }
            Ok(_) => {}
            Err(e) if e.redirected() => return None,
            Err(e) => tracing::warn!(error = %e, "Session check failed"),
        }

        self.navigator.navigate(Page::Login);
        None
    }

    /// Non-enforcing session check.
    ///
    /// A signed-in user sitting on the login or landing page is sent to the
    /// dashboard. Never redirects on failure.
    pub async fn check_auth(&self) -> Option<User> {
        let resp = match self.get(ME_ENDPOINT).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                return None;
            }
        };
        if !resp.is_success() {
            return None;
        }
        let user = resp.user()?;

        if matches!(self.role, PageRole::Auth | PageRole::Landing) {
            tracing::info!(username = %user.username, "Already signed in");
            self.navigator.navigate(Page::Dashboard);
        }
        Some(user)
    }

    /// End the session. The login flag is cleared and the login page loaded
    /// once the call completes, whatever its outcome.
    pub async fn logout(&self) {
        let result = self.post::<Value>(LOGOUT_ENDPOINT, None).await;

        if let Err(e) = self.store.remove(LOGGED_IN_FLAG) {
            tracing::warn!(error = %e, "Could not clear login flag");
        }

        match result {
            Ok(_) => tracing::info!("Logged out"),
            // Navigation to the login page already happened
            Err(e) if e.redirected() => return,
            Err(e) => tracing::warn!(error = %e, "Logout call failed"),
        }
        self.navigator.navigate(Page::Login);
    }

    /// Submit credentials. Invalid credentials come back as an unsuccessful
    /// body rather than an error, so the page can show the server's message.
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        let resp = self
            .post(LOGIN_ENDPOINT, Some(&Credentials { username, password }))
            .await?;

        if resp.is_success() {
            if let Err(e) = self.store.set(LOGGED_IN_FLAG, "true") {
                tracing::warn!(error = %e, "Could not set login flag");
            }
            tracing::info!(username, "Logged in");
        }
        Ok(resp)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.post(REGISTER_ENDPOINT, Some(&Credentials { username, password }))
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiResponse, ApiError> {
        let body = PasswordChange {
            old_password,
            new_password,
        };
        self.post(CHANGE_PASSWORD_ENDPOINT, Some(&body)).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let resp = self.get(HEALTH_ENDPOINT).await?;
        Ok(resp.data()?)
    }

    /// Startup hook run once per page load: every page except the auth
    /// forms checks the session.
    pub async fn on_page_load(&self) -> Option<User> {
        if self.role == PageRole::Auth {
            return None;
        }
        self.check_auth().await
    }

    /// Value of the local "logged in" hint
    pub fn is_flagged_logged_in(&self) -> bool {
        self.store.get(LOGGED_IN_FLAG).as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::models::HttpMethod;
    use crate::navigation::PageHistory;
    use crate::network::scripted::ScriptedTransport;
    use crate::storage::{LocalStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;

    const VALID_SESSION: &str =
        r#"{"success": true, "user": {"username": "asha", "walletBalance": 80.0, "role": "USER"}}"#;

    struct Harness {
        client: ApiClient,
        history: Arc<PageHistory>,
        store: Arc<MemoryStore>,
        transport: Arc<ScriptedTransport>,
    }

    fn harness(page: Page, transport: ScriptedTransport) -> Harness {
        let history = Arc::new(PageHistory::new());
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(transport);
        let client = ApiClient::new(
            ClientConfig::new("http://metro.test/api"),
            page.role(),
            transport.clone(),
            history.clone(),
            store.clone(),
        );
        Harness {
            client,
            history,
            store,
            transport,
        }
    }

    #[tokio::test]
    async fn test_require_auth_returns_user() {
        let h = harness(
            Page::Dashboard,
            ScriptedTransport::new().respond("/me", 200, VALID_SESSION),
        );

        let user = h.client.require_auth().await.unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(h.history.last(), None);
    }

    #[tokio::test]
    async fn test_require_auth_redirects_once_on_401() {
        let h = harness(
            Page::Profile,
            ScriptedTransport::new().respond("/me", 401, r#"{"success": false}"#),
        );

        assert!(h.client.require_auth().await.is_none());
        assert_eq!(h.history.visited(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn test_require_auth_redirects_without_user_record() {
        let h = harness(
            Page::Dashboard,
            ScriptedTransport::new().respond("/me", 200, r#"{"success": true}"#),
        );

        assert!(h.client.require_auth().await.is_none());
        assert_eq!(h.history.visited(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn test_require_auth_redirects_on_invalid_session() {
        let h = harness(
            Page::Dashboard,
            ScriptedTransport::new().respond("/me", 404, r#"{"success": false, "error": "User not found"}"#),
        );

        assert!(h.client.require_auth().await.is_none());
        assert_eq!(h.history.last(), Some(Page::Login));
    }

    #[tokio::test]
    async fn test_check_auth_on_login_page_with_session() {
        let h = harness(
            Page::Login,
            ScriptedTransport::new().respond("/me", 200, VALID_SESSION),
        );

        let user = h.client.check_auth().await.unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(h.history.last(), Some(Page::Dashboard));
    }

    #[tokio::test]
    async fn test_check_auth_on_login_page_without_session() {
        let h = harness(
            Page::Login,
            ScriptedTransport::new().respond("/me", 401, r#"{"success": false, "error": "Not logged in"}"#),
        );

        assert!(h.client.check_auth().await.is_none());
        assert_eq!(h.history.last(), None);
    }

    #[tokio::test]
    async fn test_check_auth_on_protected_page_does_not_bounce() {
        let h = harness(
            Page::Ticket,
            ScriptedTransport::new().respond("/me", 200, VALID_SESSION),
        );

        assert!(h.client.check_auth().await.is_some());
        assert_eq!(h.history.last(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_flag_and_redirects() {
        let h = harness(
            Page::Dashboard,
            ScriptedTransport::new().respond("/logout", 200, r#"{"success": true, "message": "Logged out successfully"}"#),
        );
        h.store.set(LOGGED_IN_FLAG, "true").unwrap();

        h.client.logout().await;
        assert_eq!(h.store.get(LOGGED_IN_FLAG), None);
        assert_eq!(h.history.last(), Some(Page::Login));

        let sent = h.transport.sent();
        assert_eq!(sent[0].method, HttpMethod::POST);
        assert!(sent[0].url.ends_with("/logout"));
    }

    #[tokio::test]
    async fn test_logout_redirects_even_when_call_fails() {
        let h = harness(
            Page::Index,
            ScriptedTransport::new().respond("/logout", 500, "Internal Server Error"),
        );
        h.store.set(LOGGED_IN_FLAG, "true").unwrap();

        h.client.logout().await;
        assert_eq!(h.store.get(LOGGED_IN_FLAG), None);
        assert_eq!(h.history.visited(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn test_logout_on_protected_page_after_401() {
        let h = harness(
            Page::Dashboard,
            ScriptedTransport::new().respond(
                "/logout",
                401,
                r#"{"success": false, "error": "Not logged in"}"#,
            ),
        );
        h.store.set(LOGGED_IN_FLAG, "true").unwrap();

        h.client.logout().await;
        assert_eq!(h.store.get(LOGGED_IN_FLAG), None);
        assert_eq!(h.history.visited(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn test_logout_with_backend_down() {
        let h = harness(Page::Profile, ScriptedTransport::new());
        h.store.set(LOGGED_IN_FLAG, "true").unwrap();

        h.client.logout().await;
        assert!(!h.client.is_flagged_logged_in());
        assert_eq!(h.history.last(), Some(Page::Login));
    }

    #[tokio::test]
    async fn test_login_sets_flag() {
        let h = harness(
            Page::Login,
            ScriptedTransport::new().respond(
                "/login",
                200,
                r#"{"success": true, "message": "Login successful", "user": {"username": "asha"}}"#,
            ),
        );

        let resp = h.client.login("asha", "secret1").await.unwrap();
        assert_eq!(resp.user().unwrap().username, "asha");
        assert!(h.client.is_flagged_logged_in());
        assert_eq!(
            h.transport.sent()[0].body,
            Some(json!({"username": "asha", "password": "secret1"}))
        );
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let h = harness(
            Page::Login,
            ScriptedTransport::new().respond(
                "/login",
                401,
                r#"{"success": false, "error": "Invalid credentials"}"#,
            ),
        );

        let resp = h.client.login("asha", "wrong").await.unwrap();
        assert_eq!(resp.error(), Some("Invalid credentials"));
        assert!(!h.client.is_flagged_logged_in());
        assert_eq!(h.history.last(), None);
    }

    #[tokio::test]
    async fn test_register_surfaces_validation_error() {
        let h = harness(
            Page::Register,
            ScriptedTransport::new().respond(
                "/register",
                400,
                r#"{"success": false, "error": "Username already exists"}"#,
            ),
        );

        let err = h.client.register("asha", "secret1").await.unwrap_err();
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[tokio::test]
    async fn test_change_password_body() {
        let h = harness(
            Page::Profile,
            ScriptedTransport::new().respond(
                "/user/change-password",
                200,
                r#"{"success": true, "message": "Password changed successfully"}"#,
            ),
        );

        h.client.change_password("old-pass", "new-pass").await.unwrap();
        assert_eq!(
            h.transport.sent()[0].body,
            Some(json!({"oldPassword": "old-pass", "newPassword": "new-pass"}))
        );
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(
            Page::Index,
            ScriptedTransport::new().respond(
                "/health",
                200,
                r#"{"success": true, "message": "Metro Backend API is running", "version": "1.0.0"}"#,
            ),
        );

        let status = h.client.health().await.unwrap();
        assert_eq!(status.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_page_load_skips_auth_pages() {
        let h = harness(Page::Login, ScriptedTransport::new().respond("/me", 200, VALID_SESSION));

        assert!(h.client.on_page_load().await.is_none());
        assert!(h.transport.sent().is_empty());
        assert_eq!(h.history.last(), None);
    }

    #[tokio::test]
    async fn test_page_load_on_landing_page_forwards_to_dashboard() {
        let h = harness(Page::Index, ScriptedTransport::new().respond("/me", 200, VALID_SESSION));

        assert!(h.client.on_page_load().await.is_some());
        assert_eq!(h.history.last(), Some(Page::Dashboard));
    }
}
