//! Login Page Reducer
//!
//! ```text
//! Login        → pending, error cleared
//! LoginSuccess → not pending
//! LoginFailure → not pending, error set
//! Logout       → initial
//! ```

use super::replace_if_changed;
use crate::actions::{Action, AuthAction};
use crate::state::LoginPageState;
use std::sync::Arc;

pub fn reduce_login_page(state: &Arc<LoginPageState>, action: &Action) -> Arc<LoginPageState> {
    let Action::Auth(action) = action else {
        return Arc::clone(state);
    };

    match action {
        AuthAction::Login(_) => replace_if_changed(
            state,
            LoginPageState {
                pending: true,
                error: None,
            },
        ),
        AuthAction::LoginSuccess { .. } => replace_if_changed(
            state,
            LoginPageState {
                pending: false,
                error: None,
            },
        ),
        AuthAction::LoginFailure(error) => replace_if_changed(
            state,
            LoginPageState {
                pending: false,
                error: Some(error.clone()),
            },
        ),
        AuthAction::Logout => replace_if_changed(state, LoginPageState::default()),
        AuthAction::LoginRedirect => Arc::clone(state),
    }
}
