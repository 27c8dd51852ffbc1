//! Configuration loading.
//!
//! `defaults/mdpad.default.yaml` is embedded into the binary. A user
//! config file and `MDPAD__*` environment variables are layered on top of
//! it before deserializing into [`MdpadConfig`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};

use super::{ConfigError, MdpadConfig};

const DEFAULT_YAML: &str = include_str!("../../defaults/mdpad.default.yaml");

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "mdpad.yaml";

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `MDPAD__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix("MDPAD")
                .separator("__")
                .try_parsing(true),
        );
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdpadConfig, ConfigError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Start a loader for the config named on the command line, defaulting
    /// to `mdpad.yaml` in the working directory.
    ///
    /// An explicitly named file must exist; the default file is optional.
    /// Environment variables are layered on top. Returns the loader and the
    /// path the config was looked up at.
    pub fn from_arg(config_file: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CwdFailure)?;
        let loader = Loader::new();

        let (loader, path) = match config_file {
            Some(path) => {
                let path = if path.is_relative() {
                    cwd.join(path)
                } else {
                    path.to_path_buf()
                };
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                (loader.with_file(&path), path)
            }
            None => {
                let path = cwd.join(DEFAULT_CONFIG_FILE);
                (loader.with_optional_file(&path), path)
            }
        };

        Ok((loader.with_env(), path))
    }
}

impl MdpadConfig {
    /// Load the config named on the command line. See [`Loader::from_arg`].
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let (loader, path) = Loader::from_arg(config_file)?;
        let config = loader.build()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok((config, path))
    }

    /// The storage directory, resolved against `base_path` when relative.
    pub fn storage_dir(&self, base_path: &Path) -> PathBuf {
        if self.storage.dir.is_relative() {
            base_path.join(&self.storage.dir)
        } else {
            self.storage.dir.clone()
        }
    }
}

/// Get the base path (directory containing the config file).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
