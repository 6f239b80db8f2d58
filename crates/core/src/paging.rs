// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Paging dimensions and paged results.

use crate::error::{Error, Result};
use crate::locator::Locator;

/// Items to skip, counted over matching items.
pub const START: &str = "start";
/// Maximum number of items to return; negative means unbounded.
pub const COUNT: &str = "count";
/// Maximum number of candidates to examine.
pub const LOOKUP_LIMIT: &str = "lookupLimit";

/// Dimensions every paged finder accepts as hidden.
pub const PAGING_DIMENSIONS: [&str; 3] = [START, COUNT, LOOKUP_LIMIT];

/// Bounds applied to the stream of matching items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingBounds {
    /// Matching items to skip before collecting.
    pub start: Option<u64>,
    /// Matching items to collect; `None` is unbounded.
    pub count: Option<u64>,
    /// Candidates to examine before giving up; `None` is unbounded.
    pub lookup_limit: Option<u64>,
}

impl PagingBounds {
    /// Bounds that skip nothing and collect everything.
    pub fn unbounded() -> Self {
        PagingBounds::default()
    }

    /// Reads `start`, `count` and `lookupLimit` from a locator.
    ///
    /// `default_count` and `default_lookup_limit` apply when the dimension is
    /// absent. A negative `count` or `lookupLimit` disables the bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadLocatorValue`] for non-numeric values or a negative `start`.
    pub fn from_locator(
        locator: &mut Locator,
        default_count: Option<u64>,
        default_lookup_limit: Option<u64>,
    ) -> Result<Self> {
        let start = match locator.get_single_dimension_value_as_long(START)? {
            None => None,
            Some(value) => Some(u64::try_from(value).map_err(|_| {
                Error::bad_value(START, &value.to_string(), "must not be negative")
            })?),
        };
        let count = match locator.get_single_dimension_value_as_long(COUNT)? {
            None => default_count,
            Some(value) => u64::try_from(value).ok(),
        };
        let lookup_limit = match locator.get_single_dimension_value_as_long(LOOKUP_LIMIT)? {
            None => default_lookup_limit,
            Some(value) => u64::try_from(value).ok(),
        };
        Ok(PagingBounds {
            start,
            count,
            lookup_limit,
        })
    }
}

/// Items selected by a finder together with the paging window used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedSearchResult<T> {
    /// Selected items in candidate order.
    pub items: Vec<T>,
    /// Effective number of skipped matches.
    pub start: u64,
    /// Effective page size, `None` when unbounded.
    pub count: Option<u64>,
    /// Number of candidates examined.
    pub processed: u64,
    /// True if the scan stopped because the lookup limit was hit.
    pub lookup_limit_reached: bool,
}

impl<T> PagedSearchResult<T> {
    /// A result holding exactly one item, as produced by id lookups.
    pub fn single(item: T) -> Self {
        PagedSearchResult {
            items: vec![item],
            start: 0,
            count: None,
            processed: 1,
            lookup_limit_reached: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start of the following page, if this page was filled completely.
    pub fn next_start(&self) -> Option<u64> {
        let len = self.items.len() as u64;
        match self.count {
            Some(count) if count > 0 && len == count => Some(self.start + len),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "paging_tests.rs"]
mod tests;
