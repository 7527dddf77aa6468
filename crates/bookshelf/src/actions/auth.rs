//! Authentication actions

use crate::state::User;
use std::fmt;
use std::sync::Arc;

pub const LOGIN: &str = "[Auth] Login";
pub const LOGOUT: &str = "[Auth] Logout";
pub const LOGIN_SUCCESS: &str = "[Auth] Login Success";
pub const LOGIN_FAILURE: &str = "[Auth] Login Failure";
pub const LOGIN_REDIRECT: &str = "[Auth] Login Redirect";

/// Username and password entered on the login page
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Actions are logged; keep the password out of it
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Submit the login form
    Login(Credentials),
    /// The auth service accepted the credentials
    LoginSuccess { user: Arc<User> },
    /// The auth service rejected the credentials or failed
    LoginFailure(String),
    /// A protected page was visited while logged out
    LoginRedirect,
    Logout,
}

impl AuthAction {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthAction::Login(_) => LOGIN,
            AuthAction::LoginSuccess { .. } => LOGIN_SUCCESS,
            AuthAction::LoginFailure(_) => LOGIN_FAILURE,
            AuthAction::LoginRedirect => LOGIN_REDIRECT,
            AuthAction::Logout => LOGOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("test", "hunter2");
        let printed = format!("{:?}", AuthAction::Login(credentials));

        assert!(printed.contains("test"));
        assert!(!printed.contains("hunter2"));
    }
}
