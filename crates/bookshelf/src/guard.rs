//! Route guard for pages that need a logged-in user

use crate::actions::{Action, AuthAction};
use crate::selectors;
use bookshelf_store::{Selector, Store};

/// Allows navigation only when a user is logged in
pub struct AuthGuard {
    store: Store<Action>,
    logged_in: Box<dyn Selector<Output = bool>>,
}

impl AuthGuard {
    pub fn new(store: Store<Action>) -> Self {
        Self {
            store,
            logged_in: Box::new(selectors::logged_in()),
        }
    }

    /// Check one navigation attempt
    ///
    /// Reads the current state synchronously. When logged out, dispatches
    /// `LoginRedirect` and denies.
    pub fn can_activate(&self, path: &str) -> bool {
        let logged_in = self.store.select_now(self.logged_in.as_ref());
        if !logged_in {
            log::info!("AuthGuard: denied {}, redirecting to login", path);
            self.store.dispatch(AuthAction::LoginRedirect.into());
        }
        logged_in
    }
}
