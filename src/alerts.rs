//! Transient user notifications
//!
//! Pages push alerts here; a renderer reads [`AlertCenter::visible`]. Alerts
//! dismiss themselves once their display time has elapsed.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::constants::ALERT_DISMISS_AFTER;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Alert {
    fn expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.shown_at) >= ttl
    }
}

#[derive(Debug)]
struct Inner {
    alerts: Vec<Alert>,
    next_id: u64,
}

#[derive(Debug)]
pub struct AlertCenter {
    inner: Mutex<Inner>,
    dismiss_after: Duration,
}

impl Default for AlertCenter {
    fn default() -> Self {
        Self::with_dismiss_after(ALERT_DISMISS_AFTER)
    }
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        AlertCenter {
            inner: Mutex::new(Inner {
                alerts: Vec::new(),
                next_id: 1,
            }),
            dismiss_after,
        }
    }

    /// Queue a notification; returns its id
    pub fn show_alert(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let message = message.into();
        match severity {
            Severity::Error => tracing::error!(%message, "Alert"),
            Severity::Warning => tracing::warn!(%message, "Alert"),
            Severity::Info | Severity::Success => tracing::info!(%message, %severity, "Alert"),
        }

        let Ok(mut inner) = self.inner.lock() else {
            return 0;
        };
        let id = inner.next_id;
        inner.next_id += 1;
        inner.alerts.push(Alert {
            id,
            message,
            severity,
            shown_at: Instant::now(),
        });
        id
    }

    /// Alerts still on screen, oldest first. Expired ones are dropped.
    pub fn visible(&self) -> Vec<Alert> {
        let Ok(mut inner) = self.inner.lock() else {
            return Vec::new();
        };
        let now = Instant::now();
        let ttl = self.dismiss_after;
        inner.alerts.retain(|a| !a.expired(now, ttl));
        inner.alerts.clone()
    }

    /// Close an alert before its timer runs out
    pub fn dismiss(&self, id: u64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.alerts.retain(|a| a.id != id);
        }
    }
}
