use crate::actions::Action;
use crate::reducers::{
    auth_status_reducer::reduce_auth_status, layout_reducer::reduce_layout,
    login_page_reducer::reduce_login_page,
};
use crate::state::{AuthStatus, LayoutState, LoginPageState};
use bookshelf_store::{reducer_fn, CombinedReducer, StoreError};

/// Top-level slice holding the layout
pub const LAYOUT: &str = "layout";
/// Feature grouping the auth slices
pub const AUTH: &str = "auth";
/// `auth.status`
pub const AUTH_STATUS: &str = "status";
/// `auth.login_page`
pub const AUTH_LOGIN_PAGE: &str = "login_page";

/// Root reducer - every top-level slice except features
pub fn root_reducer() -> Result<CombinedReducer<Action>, StoreError> {
    CombinedReducer::new().slice(LAYOUT, reducer_fn(LayoutState::default(), reduce_layout))
}

/// Reducers of the auth feature
pub fn auth_reducer() -> Result<CombinedReducer<Action>, StoreError> {
    CombinedReducer::new()
        .slice(
            AUTH_STATUS,
            reducer_fn(AuthStatus::default(), reduce_auth_status),
        )?
        .slice(
            AUTH_LOGIN_PAGE,
            reducer_fn(LoginPageState::default(), reduce_login_page),
        )
}
