//! Store wiring for the application

use crate::actions::Action;
use crate::reducer::{auth_reducer, root_reducer, AUTH};
use bookshelf_config::AppConfig;
use bookshelf_store::{Store, StoreError};

/// Build the application store
///
/// Logging and the immutability guard follow the configuration; both are on
/// outside production mode unless set explicitly.
pub fn build_store(config: &AppConfig) -> Result<Store<Action>, StoreError> {
    Store::builder(root_reducer()?)
        .feature(AUTH, auth_reducer()?)
        .logging(config.log_actions())
        .runtime_checks(config.runtime_checks())
        .build()
}
