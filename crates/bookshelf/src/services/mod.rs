//! External collaborators used by effects and the guard

pub mod auth_service;
pub mod navigator;

pub use auth_service::{AuthError, AuthService, DemoAuthService};
pub use navigator::{ConsoleNavigator, Navigator};
