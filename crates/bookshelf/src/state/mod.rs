//! Application state slices
//!
//! ```text
//! layout: LayoutState
//! auth:
//!   status: AuthStatus
//!   login_page: LoginPageState
//! ```

pub mod auth;
pub mod layout;

pub use auth::{AuthStatus, LoginPageState, LoginPhase, User};
pub use layout::LayoutState;
