//! Selectors over the application state
//!
//! Each function builds a fresh selector with its own memo cell; keep the
//! returned value around (as the guard and console do) to benefit from
//! memoization.

use crate::reducer::{AUTH, AUTH_LOGIN_PAGE, AUTH_STATUS, LAYOUT};
use crate::state::{AuthStatus, LayoutState, LoginPageState, LoginPhase, User};
use bookshelf_store::{
    create_selector, feature_selector, slice_selector, FeatureSelector, Selector, SliceSelector,
    StateTree,
};
use std::sync::Arc;

pub fn layout() -> FeatureSelector<LayoutState> {
    feature_selector(LAYOUT)
}

pub fn show_sidenav() -> impl Selector<Output = bool> {
    create_selector((layout(),), |(layout,)| layout.show_sidenav)
}

/// The auth feature tree
pub fn auth() -> FeatureSelector<StateTree> {
    feature_selector(AUTH)
}

pub fn auth_status() -> SliceSelector<FeatureSelector<StateTree>, AuthStatus> {
    slice_selector(auth(), AUTH_STATUS)
}

pub fn logged_in() -> impl Selector<Output = bool> {
    create_selector((auth_status(),), |(status,)| status.logged_in)
}

pub fn user() -> impl Selector<Output = Option<Arc<User>>> {
    create_selector((auth_status(),), |(status,)| status.user.clone())
}

pub fn login_page() -> SliceSelector<FeatureSelector<StateTree>, LoginPageState> {
    slice_selector(auth(), AUTH_LOGIN_PAGE)
}

pub fn login_pending() -> impl Selector<Output = bool> {
    create_selector((login_page(),), |(page,)| page.pending)
}

pub fn login_error() -> impl Selector<Output = Option<String>> {
    create_selector((login_page(),), |(page,)| page.error.clone())
}

/// Phase of the login flow, combining both auth slices
pub fn login_phase() -> impl Selector<Output = LoginPhase> {
    create_selector((auth_status(), login_page()), |(status, page)| {
        LoginPhase::from_slices(status, page)
    })
}
