// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod get;
pub mod list;
pub mod parse;
pub mod tags;

use std::path::Path;

use lk_core::{FinderOptions, TimeCondition};

use crate::catalog::{Catalog, CatalogSource};
use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use crate::finders::FinderContext;
use crate::permissions::ConfigPermissions;

/// Everything a query command needs: the catalog and the caller's settings.
pub struct Session {
    source: CatalogSource,
    permissions: ConfigPermissions,
    time: TimeCondition,
    options: FinderOptions,
}

impl Session {
    /// A session over a catalog file, read on first query.
    pub fn open(config: &Config, catalog: &Path) -> Self {
        Session::with_source(config, CatalogSource::open(catalog))
    }

    pub fn from_catalog(config: &Config, catalog: Catalog) -> Self {
        Session::with_source(config, CatalogSource::from_catalog(catalog))
    }

    fn with_source(config: &Config, source: CatalogSource) -> Self {
        Session {
            source,
            permissions: ConfigPermissions::new(&config.permissions),
            time: TimeCondition::default(),
            options: config.finder_options(),
        }
    }

    /// Replaces the clock used for relative times.
    pub fn with_time(mut self, time: TimeCondition) -> Self {
        self.time = time;
        self
    }

    /// Finder context over the loaded catalog.
    ///
    /// # Errors
    ///
    /// Fails if the catalog cannot be read.
    pub fn context(&self) -> Result<FinderContext<'_>> {
        Ok(FinderContext {
            catalog: self.source.get()?,
            permissions: &self.permissions,
            time: &self.time,
            options: &self.options,
        })
    }
}

/// Runs a catalog command and returns its output.
pub fn dispatch(session: &Session, command: &Command) -> Result<String> {
    match command {
        Command::List {
            kind,
            locator,
            output,
        } => list::run(session, *kind, locator.as_deref(), *output),
        Command::Get {
            kind,
            locator,
            output,
        } => get::run(session, *kind, locator, *output),
        Command::Tags {
            build,
            locator,
            output,
        } => tags::run(session, build, locator.as_deref(), *output),
        Command::Parse { locator } => parse::run(locator),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
