//! Application constants
//!
//! Centralized location for endpoint paths, storage keys and defaults.

use std::time::Duration;

/// Backend origin plus the `/api` prefix
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "METRO_API_URL";

/// Session check
pub const ME_ENDPOINT: &str = "/me";

/// Credential submission, exempt from redirect-on-401
pub const LOGIN_ENDPOINT: &str = "/login";

pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/user/change-password";
pub const HEALTH_ENDPOINT: &str = "/health";

/// Local flag marking the user as logged in (UI hint only)
pub const LOGGED_IN_FLAG: &str = "metro_logged_in";

/// Error text of the synthetic response returned for a 401 on a public page
pub const NOT_LOGGED_IN: &str = "Not logged in";

/// Error text used when a failed response carries no `error` field
pub const FALLBACK_ERROR: &str = "Request failed";

/// How long an alert stays visible
pub const ALERT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Directory under the home directory holding config and local storage
pub const CONFIG_DIR_NAME: &str = ".metro";

/// Application name
pub const APP_NAME: &str = "Metro Client";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
