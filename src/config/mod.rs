//! Configuration loading and types for mdpad.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Layered loading from defaults, files and the environment (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use load::{DEFAULT_CONFIG_FILE, Loader, base_path_from_config};
pub use types::{MdpadConfig, PreviewConfig, ServeConfig, StorageConfig, WatchConfig};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}
