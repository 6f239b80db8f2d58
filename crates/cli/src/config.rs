// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query configuration.
//!
//! Configuration is read from `lok.toml` and includes:
//! - `catalog`: path to the JSON catalog (relative paths resolve against the file)
//! - `[finder]`: paging defaults and strictness applied to every finder
//! - `[permissions]`: projects the caller may not view

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use lk_core::FinderOptions;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "lok.toml";
pub const CATALOG_ENV: &str = "LOK_CATALOG";

/// Contents of `lok.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: Option<PathBuf>,
    pub finder: FinderConfig,
    pub permissions: PermissionsConfig,
}

/// Defaults applied when a locator has no paging dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Page size; negative means unbounded.
    pub default_count: i64,
    /// Reject locators with dimensions no finder reads.
    pub strict: bool,
    /// Candidate scan limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_limit: Option<u64>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            default_count: 100,
            strict: true,
            lookup_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Project ids hidden from the caller.
    pub hidden_projects: Vec<String>,
}

impl Config {
    /// Loads configuration from a specific file.
    ///
    /// A relative `catalog` path is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        if let (Some(catalog), Some(dir)) = (&config.catalog, path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(dir.join(catalog));
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the explicit file if given, else `lok.toml` in `dir` if present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Config::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Config::load(&candidate)
        } else {
            Ok(Config::default())
        }
    }

    /// Picks the catalog path: command line, then environment, then file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogNotConfigured`] when none of them names one.
    pub fn catalog_path(&self, cli: Option<&Path>, env: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = cli {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }
        self.catalog.clone().ok_or(Error::CatalogNotConfigured)
    }

    /// Finder behavior derived from the `[finder]` table.
    pub fn finder_options(&self) -> FinderOptions {
        let default_count = u64::try_from(self.finder.default_count).ok();
        FinderOptions::default()
            .with_strict(self.finder.strict)
            .with_default_count(default_count)
            .with_lookup_limit(self.finder.lookup_limit)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
