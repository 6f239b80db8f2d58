// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lokrs - locator queries over a build-server catalog.
//!
//! This crate provides the `lok` CLI: it loads a JSON catalog of agents,
//! builds and changes and answers locator queries against it using the
//! finders from `lk-core`.
//!
//! # Main Components
//!
//! - [`Catalog`] / [`CatalogSource`] - the queried data, loaded lazily
//! - [`Config`] - `lok.toml` settings (catalog path, finder defaults, hidden projects)
//! - [`AgentFinder`], [`BuildFinder`], [`ChangeFinder`], [`TagFinder`] - entity finders
//! - [`Error`] - error types for all operations
//!
//! ```rust,ignore
//! use lokrs::{Catalog, Config};
//!
//! let catalog = Catalog::from_json(&std::fs::read_to_string("catalog.json")?)?;
//! let session = Session::from_catalog(&Config::default(), catalog);
//! let builds = session.context()?.builds().get_items(Some("status:failure"))?;
//! ```

mod catalog;
mod cli;
mod commands;
mod display;
mod finders;
mod permissions;

pub mod config;
pub mod error;
pub mod models;

pub use catalog::{Catalog, CatalogSource};
pub use cli::{Cli, Command, Kind, OutputFormat};
pub use commands::Session;
pub use config::Config;
pub use error::{Error, Result};
pub use finders::{
    AgentDimension, AgentFinder, BuildDimension, BuildFinder, ChangeDimension, ChangeFinder,
    FinderContext, TagDimension, TagFinder,
};

use std::path::Path;

use config::CATALOG_ENV;

/// Runs a parsed command line, printing its output to stdout.
///
/// # Errors
///
/// Returns configuration, catalog and query errors; see [`Error::exit_code`].
pub fn run(cli: Cli) -> Result<()> {
    let dir = std::env::current_dir()?;
    let env = std::env::var(CATALOG_ENV).ok();
    let output = execute(&cli, &dir, env.as_deref())?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Runs a command with `dir` as the working directory and `env` as the
/// value of `LOK_CATALOG`, returning its output.
fn execute(cli: &Cli, dir: &Path, env: Option<&str>) -> Result<String> {
    if let Command::Parse { locator } = &cli.command {
        return commands::parse::run(locator);
    }
    let config = Config::discover(cli.config.as_deref(), dir)?;
    let catalog = config.catalog_path(cli.catalog.as_deref(), env)?;
    tracing::debug!(catalog = %catalog.display(), "opening catalog");
    let session = Session::open(&config, &catalog);
    commands::dispatch(&session, &cli.command)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
