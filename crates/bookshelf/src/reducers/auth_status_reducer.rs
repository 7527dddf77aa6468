//! Auth Status Reducer
//!
//! Tracks whether a user is logged in and who.

use super::replace_if_changed;
use crate::actions::{Action, AuthAction};
use crate::state::AuthStatus;
use std::sync::Arc;

pub fn reduce_auth_status(state: &Arc<AuthStatus>, action: &Action) -> Arc<AuthStatus> {
    match action {
        Action::Auth(AuthAction::LoginSuccess { user }) => Arc::new(AuthStatus {
            logged_in: true,
            user: Some(Arc::clone(user)),
        }),
        Action::Auth(AuthAction::Logout) => replace_if_changed(state, AuthStatus::default()),
        _ => Arc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Credentials;
    use crate::state::User;
    use pretty_assertions::assert_eq;

    fn logged_in_as(name: &str) -> Arc<AuthStatus> {
        reduce_auth_status(
            &Arc::new(AuthStatus::default()),
            &AuthAction::LoginSuccess {
                user: Arc::new(User::new(name)),
            }
            .into(),
        )
    }

    #[test]
    fn test_login_success_attaches_user() {
        let state = logged_in_as("bob");

        assert!(state.logged_in);
        assert_eq!(state.user.as_deref(), Some(&User::new("bob")));
    }

    #[test]
    fn test_logout_resets_and_is_idempotent() {
        let state = logged_in_as("bob");

        let logged_out = reduce_auth_status(&state, &AuthAction::Logout.into());
        assert_eq!(*logged_out, AuthStatus::default());

        let again = reduce_auth_status(&logged_out, &AuthAction::Logout.into());
        assert!(Arc::ptr_eq(&logged_out, &again));
    }

    #[test]
    fn test_login_attempt_does_not_touch_status() {
        let state = logged_in_as("bob");
        let next = reduce_auth_status(
            &state,
            &AuthAction::Login(Credentials::new("alice", "secret")).into(),
        );
        assert!(Arc::ptr_eq(&state, &next));
    }
}
