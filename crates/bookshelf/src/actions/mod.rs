//! Actions module
//!
//! Actions are tagged by feature:
//! - `Layout`: sidenav visibility
//! - `Auth`: the login flow, logout and redirects

pub mod auth;
pub mod layout;

pub use auth::{AuthAction, Credentials};
pub use layout::LayoutAction;

use bookshelf_store::Action as StoreAction;

/// Root action enum - tagged by feature
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Layout actions (sidenav)
    Layout(LayoutAction),
    /// Authentication actions
    Auth(AuthAction),
}

impl StoreAction for Action {
    fn kind(&self) -> &'static str {
        match self {
            Action::Layout(action) => action.kind(),
            Action::Auth(action) => action.kind(),
        }
    }
}

impl From<LayoutAction> for Action {
    fn from(action: LayoutAction) -> Self {
        Action::Layout(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}
