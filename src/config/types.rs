//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `mdpad.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdpadConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Where documents are saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the saved documents.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".mdpad")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Preview server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    /// The address to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
    /// Reload open preview pages when a document changes (default: true)
    #[serde(default = "default_live_reload")]
    pub live_reload: bool,
    /// Open the preview in the default browser on start
    #[serde(default)]
    pub open: bool,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_live_reload() -> bool {
    true
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            live_reload: default_live_reload(),
            open: false,
        }
    }
}

/// Configuration for file watching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Use polling-based watcher instead of native file system events.
    /// Useful for network filesystems, Docker volumes, or other situations
    /// where native events are unreliable.
    #[serde(default)]
    pub poll: bool,
    /// Poll interval in milliseconds (only used if poll=true).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Debounce timeout in milliseconds.
    /// Changes within this window are batched together.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll: false,
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Preview page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Shown in the title of every preview page
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "mdpad".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}
