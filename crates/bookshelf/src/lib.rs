//! Bookshelf - demo application on top of the bookshelf store
//!
//! A sidenav toggle and a login flow: actions feed reducers, selectors
//! derive what the console prints, effects call the auth service and
//! navigate, and a guard protects pages behind the login.

pub mod actions;
pub mod console;
pub mod effects;
pub mod guard;
pub mod logger;
pub mod reducer;
pub mod reducers;
pub mod selectors;
pub mod services;
pub mod state;
pub mod store;

pub use actions::Action;
pub use store::build_store;
