// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(babamm.toml)
//!   .add_toml_file(--ini)
//!   .add_toml_str()
//!   .with_env_prefix("BABAMM")
//!   .set(--set)
//!        |
//!        v
//!    build() --> Config
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a layer of settings came from, as listed by `babamm inis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--ini FILE`; must exist.
    File,
    /// `babamm.toml`; listed only when present.
    Optional,
    /// TOML text passed in directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        })
    }
}

/// Stacks TOML files, environment variables and `--set` overrides; later
/// layers win.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<(ConfigSource, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, kind: ConfigSource) -> Self {
        let required = kind == ConfigSource::File;
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.is_file() {
            self.sources.push((kind, path.to_path_buf()));
        }
        self
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), ConfigSource::File)
    }

    /// Adds a TOML file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), ConfigSource::Optional)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push((ConfigSource::Inline, PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides one `section.key`.
    ///
    /// # Errors
    ///
    /// Fails when `config` rejects the key.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Applies a `section.key=value` override as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the string has no `=` or no
    /// section, or an error from [`Self::set`].
    pub fn set_assignment(self, assignment: &str) -> Result<Self> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| invalid_assignment(assignment, "expected section.key=value"))?;
        let key = key.trim();
        if !key.contains('.') {
            return Err(invalid_assignment(assignment, "key must be section.key").into());
        }
        self.set(key, value.trim())
    }

    /// Merges every layer, then resolves and validates the result.
    ///
    /// # Errors
    ///
    /// Fails on a missing `--ini` file, invalid TOML, a value of the wrong
    /// type, or a setting rejected by [`Config::resolve_and_validate`].
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Sources in the order they are applied.
    #[must_use]
    pub fn loaded_files(&self) -> &[(ConfigSource, PathBuf)] {
        &self.sources
    }

    /// One `N. [kind] path` line per source.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .zip(1..)
            .map(|((kind, path), n)| format!("{n}. [{kind}] {}", path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_assignment(assignment: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "--set".to_string(),
        message: format!("{message}, got '{assignment}'"),
    }
}
