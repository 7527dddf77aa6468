//! Navigation effects
//!
//! Both are dispatch-free: they move the user and produce no actions.

use crate::actions::{
    auth::{LOGIN_REDIRECT, LOGIN_SUCCESS, LOGOUT},
    Action,
};
use crate::services::Navigator;
use async_trait::async_trait;
use bookshelf_store::Effect;
use std::sync::Arc;

pub const HOME: &str = "/";
pub const LOGIN_PAGE: &str = "/login";

/// After a successful login, go home
pub struct LoginSuccessNavigation {
    navigator: Arc<dyn Navigator>,
}

impl LoginSuccessNavigation {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }
}

#[async_trait]
impl Effect<Action> for LoginSuccessNavigation {
    fn name(&self) -> &'static str {
        "LoginSuccessNavigation"
    }

    fn kinds(&self) -> &'static [&'static str] {
        &[LOGIN_SUCCESS]
    }

    fn feeds_back(&self) -> bool {
        false
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        self.navigator.navigate(HOME);
        Vec::new()
    }
}

/// On a redirect or logout, go to the login page
pub struct LoginRedirectNavigation {
    navigator: Arc<dyn Navigator>,
}

impl LoginRedirectNavigation {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }
}

#[async_trait]
impl Effect<Action> for LoginRedirectNavigation {
    fn name(&self) -> &'static str {
        "LoginRedirectNavigation"
    }

    fn kinds(&self) -> &'static [&'static str] {
        &[LOGIN_REDIRECT, LOGOUT]
    }

    fn feeds_back(&self) -> bool {
        false
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        self.navigator.navigate(LOGIN_PAGE);
        Vec::new()
    }
}
