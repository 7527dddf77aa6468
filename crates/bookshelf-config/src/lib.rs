//! Configuration and file management for bookshelf
//!
//! This crate provides:
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)
//! - Cache directory resolution for log files

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, AuthConfig, StoreConfig};
pub use config_file::load_config_file;
pub use paths::cache_dir;
