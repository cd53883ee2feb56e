//! Pages, their roles, and the navigation seam
//!
//! Each page declares its [`PageRole`] up front; routing decisions read the
//! role instead of inspecting the current path.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// What a page requires of the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRole {
    /// Login or registration form
    Auth,
    /// Entry page shown before signing in
    Landing,
    /// Renders only for an authenticated session
    Protected,
    /// Anything else; never redirects
    Public,
}

/// Pages of the booking site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    Login,
    Register,
    Dashboard,
    Profile,
    Ticket,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Index,
        Page::Login,
        Page::Register,
        Page::Dashboard,
        Page::Profile,
        Page::Ticket,
    ];

    /// Relative path used as the navigation target
    pub fn path(&self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Login => "login.html",
            Page::Register => "register.html",
            Page::Dashboard => "dashboard.html",
            Page::Profile => "profile.html",
            Page::Ticket => "ticket.html",
        }
    }

    pub fn role(&self) -> PageRole {
        match self {
            Page::Login | Page::Register => PageRole::Auth,
            Page::Index => PageRole::Landing,
            Page::Dashboard | Page::Profile | Page::Ticket => PageRole::Protected,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Page {
    type Err = String;

    /// Accepts `login`, `login.html` or `/login.html`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/');
        let name = name.strip_suffix(".html").unwrap_or(name);
        let name = if name.is_empty() { "index" } else { name };
        Page::ALL
            .into_iter()
            .find(|page| page.path().trim_end_matches(".html") == name)
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// Performs full-page navigation
pub trait Navigator: Send + Sync {
    fn navigate(&self, page: Page);
}

/// Records navigations in order. A page host polls [`PageHistory::take_pending`]
/// to perform the actual page switch.
#[derive(Debug, Default)]
pub struct PageHistory {
    visited: Mutex<Vec<Page>>,
    pending: Mutex<Option<Page>>,
}

impl PageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation target
    pub fn last(&self) -> Option<Page> {
        self.visited.lock().ok()?.last().copied()
    }

    pub fn visited(&self) -> Vec<Page> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().map(|p| p.is_some()).unwrap_or(false)
    }

    /// Navigation requested since the last call, if any
    pub fn take_pending(&self) -> Option<Page> {
        self.pending.lock().ok()?.take()
    }
}

impl Navigator for PageHistory {
    fn navigate(&self, page: Page) {
        tracing::info!(target_page = %page, "Navigating");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(page);
        }
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(page);
        }
    }
}
