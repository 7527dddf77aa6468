//! Authentication state

use bookshelf_store::RefEq;
use std::sync::Arc;

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthStatus {
    pub logged_in: bool,
    pub user: Option<Arc<User>>,
}

/// Login form state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginPageState {
    /// A login call is in flight
    pub pending: bool,
    /// Message of the last failed login
    pub error: Option<String>,
}

/// Where the login flow currently stands, derived from both auth slices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPhase {
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

impl LoginPhase {
    pub fn from_slices(status: &AuthStatus, login_page: &LoginPageState) -> Self {
        if status.logged_in {
            LoginPhase::LoggedIn
        } else if login_page.pending {
            LoginPhase::LoggingIn
        } else {
            LoginPhase::LoggedOut
        }
    }
}

impl RefEq for LoginPhase {
    fn ref_eq(&self, other: &Self) -> bool {
        self == other
    }
}
