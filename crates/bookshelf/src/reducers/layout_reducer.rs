//! Layout Reducer
//!
//! Handles sidenav visibility.

use super::replace_if_changed;
use crate::actions::{Action, LayoutAction};
use crate::state::LayoutState;
use std::sync::Arc;

/// Reduce layout state
pub fn reduce_layout(state: &Arc<LayoutState>, action: &Action) -> Arc<LayoutState> {
    match action {
        Action::Layout(LayoutAction::OpenSidenav) => {
            replace_if_changed(state, LayoutState { show_sidenav: true })
        }
        Action::Layout(LayoutAction::CloseSidenav) => {
            replace_if_changed(state, LayoutState { show_sidenav: false })
        }
        _ => Arc::clone(state),
    }
}
