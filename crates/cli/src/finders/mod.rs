// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity finders over the catalog.
//!
//! Each finder declares its dimensions as an enum and plugs into the
//! [`lk_core::Finder`] template. Items are borrowed from the catalog.

mod agent;
mod build;
mod change;
mod tag;

pub use agent::{AgentDimension, AgentFinder};
pub use build::{BuildDimension, BuildFinder};
pub use change::{ChangeDimension, ChangeFinder};
pub use tag::{TagDimension, TagFinder};

use lk_core::{Error, FinderOptions, Locator, PermissionChecker, Result, TimeCondition};

use crate::catalog::Catalog;

/// What every finder needs besides its own dimensions.
#[derive(Clone, Copy)]
pub struct FinderContext<'c> {
    pub catalog: &'c Catalog,
    pub permissions: &'c dyn PermissionChecker,
    pub time: &'c TimeCondition,
    pub options: &'c FinderOptions,
}

impl<'c> FinderContext<'c> {
    pub fn agents(self) -> AgentFinder<'c> {
        AgentFinder::new(self)
    }

    pub fn builds(self) -> BuildFinder<'c> {
        BuildFinder::new(self)
    }

    pub fn changes(self) -> ChangeFinder<'c> {
        ChangeFinder::new(self)
    }
}

/// Parses an entity id.
pub(crate) fn parse_id(dimension: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::bad_value(dimension, value, "expected a non-negative integer id"))
}

/// Reads a single-valued id dimension.
pub(crate) fn single_id(locator: &mut Locator, dimension: &str) -> Result<Option<u64>> {
    locator
        .get_single_dimension_value(dimension)?
        .map(|value| parse_id(dimension, &value))
        .transpose()
}

/// Fails if a nested locator has dimensions its resolver never read.
pub(crate) fn check_nested(dimension: &str, nested: &Locator) -> Result<()> {
    nested
        .check_locator_fully_processed()
        .map_err(|e| Error::InvalidLocator(format!("in '{dimension}' dimension: {e}")))
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
