//! Effects of the application
//!
//! - `LoginEffect`: calls the auth service for each login attempt
//! - `LoginSuccessNavigation`: goes home after logging in
//! - `LoginRedirectNavigation`: goes to the login page on redirect or logout

pub mod login_effect;
pub mod navigation_effect;

pub use login_effect::LoginEffect;
pub use navigation_effect::{LoginRedirectNavigation, LoginSuccessNavigation};

use crate::actions::Action;
use crate::services::{AuthService, Navigator};
use bookshelf_store::EffectRunner;
use std::sync::Arc;

/// Register every application effect
pub fn register(auth: Arc<dyn AuthService>, navigator: Arc<dyn Navigator>) -> EffectRunner<Action> {
    EffectRunner::new()
        .register(LoginEffect::new(auth))
        .register(LoginSuccessNavigation::new(Arc::clone(&navigator)))
        .register(LoginRedirectNavigation::new(navigator))
}
