use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::NOT_LOGGED_IN;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
///
/// The backend is loose about types (`success: 1`, `message: ""`), so the
/// envelope checks follow the same rules a browser page would.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Response envelope returned by every backend endpoint.
///
/// Known fields are `success`, `error`, `message`, `token` and `user`; any
/// other field is backend-defined and kept untouched so the body can be
/// handed back to the caller exactly as it was received.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse {
    body: Map<String, Value>,
}

impl ApiResponse {
    /// Parse a response body. Returns `None` when the text is not a JSON
    /// object; valid JSON arrays and scalars count as unparseable, since the
    /// envelope fields cannot be read from them.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(body)) => Some(ApiResponse { body }),
            _ => None,
        }
    }

    /// Synthetic failure used when a public page hits a 401
    pub fn not_logged_in() -> Self {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert("error".into(), Value::String(NOT_LOGGED_IN.into()));
        ApiResponse { body }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    fn truthy(&self, key: &str) -> bool {
        self.get(key).map_or(false, is_truthy)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.truthy("success")
    }

    /// Inclusive-or acceptance: `success`, or a `message`, or a `token`.
    pub fn passes_success_check(&self) -> bool {
        self.is_success() || self.truthy("message") || self.truthy("token")
    }

    pub fn error(&self) -> Option<&str> {
        self.text("error")
    }

    pub fn message(&self) -> Option<&str> {
        self.text("message")
    }

    /// The `user` object, if present and shaped like a user record
    pub fn user(&self) -> Option<User> {
        let value = self.get("user")?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Deserialize the whole body into a caller-defined type
    pub fn data<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.body.clone()))
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Account role as reported by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    SupportStaff,
    #[serde(other)]
    Other,
}

/// Authenticated user as returned by `/me` and `/login`.
///
/// Every field is optional on the wire; anything the backend adds later
/// lands in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub wallet_balance: Option<f64>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub loyalty_points: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /login` and `POST /register`
#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /user/change-password`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// Body of `GET /health`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
}
