//! # Metro Client
//!
//! Session-aware client for the metro ticket booking backend.
//!
//! ## Features
//! - One facade ([`ApiClient`]) for every backend call, with cookie sessions
//! - 401 handling driven by the current page's role: redirect on protected
//!   pages, silent failure elsewhere, pass-through for login
//! - Session gates: `require_auth`, `check_auth`, `logout`, `on_page_load`
//! - Date display helpers and auto-dismissing alerts
//!
//! ## Architecture
//! - Network layer (reqwest behind the `Transport` trait)
//! - Facade (`api`) interpreting responses and deciding navigation
//! - Navigation and local storage behind traits so pages and tests can
//!   supply their own

pub mod alerts;
pub mod api;
pub mod config;
pub mod constants;
pub mod format;
pub mod models;
pub mod navigation;
pub mod network;
pub mod storage;

// Re-export commonly used types
pub use alerts::{Alert, AlertCenter, Severity};
pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use format::{format_date, format_date_time};
pub use models::{ApiResponse, HttpMethod, Role, User};
pub use navigation::{Navigator, Page, PageHistory, PageRole};
pub use network::{ReqwestTransport, Transport};
pub use storage::{FileStore, LocalStore, MemoryStore};
