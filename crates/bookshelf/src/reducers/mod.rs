//! Slice reducers
//!
//! Each reducer returns the incoming `Arc` for actions that leave its slice
//! unchanged, so selectors see the same identity.

pub mod auth_status_reducer;
pub mod layout_reducer;
pub mod login_page_reducer;

use std::sync::Arc;

/// Keep the current slice when `next` is equal to it
pub(crate) fn replace_if_changed<S: PartialEq>(state: &Arc<S>, next: S) -> Arc<S> {
    if **state == next {
        Arc::clone(state)
    } else {
        Arc::new(next)
    }
}
