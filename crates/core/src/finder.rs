// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The generic finder protocol.
//!
//! An entity finder declares its dimensions as a closed enum, compiles a
//! locator into a [`MultiCheckerFilter`], and supplies candidates in a stable
//! order. The provided methods of [`Finder`] run the shared template:
//!
//! 1. parse the text against the declared dimensions and the default locator,
//! 2. try the direct single-item lookup,
//! 3. compile the filter and fetch candidates,
//! 4. reject dimensions nobody read (when strict),
//! 5. stream candidates through a [`FilterItemProcessor`].

use std::fmt;

use crate::error::{Error, Result};
use crate::filter::MultiCheckerFilter;
use crate::locator::{DimensionSet, Locator, SINGLE_VALUE_DIMENSION};
use crate::paging::{PagedSearchResult, PagingBounds, PAGING_DIMENSIONS};
use crate::processor::FilterItemProcessor;

/// A boxed candidate sequence borrowing from its finder.
pub type ItemIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// A closed set of dimension names recognized by one finder.
pub trait Dimension: Copy + Eq + fmt::Debug + 'static {
    /// The dimension name as written in locators.
    fn name(self) -> &'static str;

    /// Every variant, in documentation order.
    fn all() -> &'static [Self];

    fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.name() == name)
    }
}

/// Per-finder behavior switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderOptions {
    /// Reject locators with dimensions the finder never read.
    pub strict: bool,
    /// Accept the hidden `start`, `count` and `lookupLimit` dimensions.
    pub paging: bool,
    /// Accept the bare single-value form.
    pub single_value: bool,
    /// Page size when `count` is absent; `None` is unbounded.
    pub default_count: Option<u64>,
    /// Candidate scan limit when `lookupLimit` is absent.
    pub lookup_limit: Option<u64>,
}

impl Default for FinderOptions {
    fn default() -> Self {
        FinderOptions {
            strict: true,
            paging: true,
            single_value: true,
            default_count: Some(100),
            lookup_limit: None,
        }
    }
}

impl FinderOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_paging(mut self, paging: bool) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_single_value(mut self, single_value: bool) -> Self {
        self.single_value = single_value;
        self
    }

    pub fn with_default_count(mut self, count: Option<u64>) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_lookup_limit(mut self, limit: Option<u64>) -> Self {
        self.lookup_limit = limit;
        self
    }
}

/// Resolves locators to items of one entity kind.
pub trait Finder {
    type Item;
    type Dimension: Dimension;

    /// Entity name used in log output.
    const KIND: &'static str;

    fn options(&self) -> &FinderOptions;

    /// Dimensions applied when the query text does not mention them.
    fn default_locator(&self) -> Option<Locator> {
        None
    }

    /// Compiles the locator's dimensions into predicates.
    ///
    /// Implementations read every dimension they support; the template checks
    /// for leftovers afterwards.
    fn get_filter<'a>(&'a self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, Self::Item>>;

    /// Every candidate, in the finder's canonical order.
    fn get_all_items(&self) -> Result<ItemIter<'_, Self::Item>>;

    /// Candidates narrowed using the locator, in canonical order.
    ///
    /// Finders override this when a dimension selects a cheaper or
    /// differently ordered candidate source. Any dimension read here must
    /// still be honored by [`Finder::get_filter`].
    fn get_prefiltered_items(&self, _locator: &mut Locator) -> Result<ItemIter<'_, Self::Item>> {
        self.get_all_items()
    }

    /// Direct lookup for locators that name one item (a single value or an id).
    ///
    /// Returns `Ok(None)` when the locator is not such a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the locator names an item that does not exist.
    fn find_single_item(&self, _locator: &mut Locator) -> Result<Option<Self::Item>> {
        Ok(None)
    }

    /// The declared dimensions plus hidden paging and single-value names.
    fn dimensions(&self) -> DimensionSet {
        let options = self.options();
        let mut set = DimensionSet::new(Self::Dimension::all().iter().map(|d| d.name()));
        if options.single_value {
            set = set.with_supported(SINGLE_VALUE_DIMENSION);
        }
        if options.paging {
            set = set.with_hidden(PAGING_DIMENSIONS);
        }
        set
    }

    /// Parses query text against this finder's dimensions.
    ///
    /// `None` text yields the default locator (or an empty one).
    fn create_locator(&self, text: Option<&str>, defaults: Option<&Locator>) -> Result<Locator> {
        let declared = self.dimensions();
        match text {
            Some(text) => Locator::parse(text, Some(&declared), defaults),
            None => {
                let mut locator = Locator::empty();
                if let Some(defaults) = defaults {
                    locator.apply_defaults(defaults);
                }
                let hidden: Vec<&str> = declared.hidden().iter().map(String::as_str).collect();
                locator.add_hidden_dimensions(&hidden);
                Ok(locator)
            }
        }
    }

    /// Paging bounds for this finder read from the locator.
    fn paging_bounds(&self, locator: &mut Locator) -> Result<PagingBounds> {
        let options = self.options();
        if !options.paging {
            return Ok(PagingBounds::unbounded());
        }
        PagingBounds::from_locator(locator, options.default_count, options.lookup_limit)
    }

    /// A filter carrying this finder's paging bounds, ready for checkers.
    fn paged_filter<'a>(&self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, Self::Item>> {
        Ok(MultiCheckerFilter::new(self.paging_bounds(locator)?))
    }

    /// Runs the unused-dimension check when the finder is strict.
    fn check_processed(&self, locator: &Locator) -> Result<()> {
        if self.options().strict {
            locator.check_locator_fully_processed()?;
        }
        Ok(())
    }

    /// Finds the page of items matching `text`.
    ///
    /// # Errors
    ///
    /// Fails on malformed locators, unsupported or unread dimensions, a
    /// single value that names no item, and candidate source errors.
    fn get_items(&self, text: Option<&str>) -> Result<PagedSearchResult<Self::Item>> {
        let defaults = self.default_locator();
        let locator = self.create_locator(text, defaults.as_ref())?;
        self.get_items_by_locator(locator)
    }

    /// Like [`Finder::get_items`] for an already parsed locator.
    fn get_items_by_locator(&self, mut locator: Locator) -> Result<PagedSearchResult<Self::Item>> {
        if let Some(item) = self.find_single_item(&mut locator)? {
            self.check_processed(&locator)?;
            return Ok(PagedSearchResult::single(item));
        }
        reject_unhandled_single_value(&locator)?;

        let filter = self.get_filter(&mut locator)?;
        let items = self.get_prefiltered_items(&mut locator)?;
        self.check_processed(&locator)?;
        tracing::debug!(
            kind = Self::KIND,
            locator = %locator,
            checkers = filter.len(),
            "compiled filter"
        );

        let mut processor = FilterItemProcessor::new(&filter);
        processor.process(items);
        Ok(processor.into_result())
    }

    /// Finds exactly one item.
    ///
    /// Paging dimensions are ignored: the filter is constrained so that a
    /// second match is detected instead of silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when nothing matches and
    /// [`Error::AmbiguousResult`] when more than one item matches.
    fn get_item(&self, text: &str) -> Result<Self::Item> {
        let defaults = self.default_locator();
        let mut locator = self.create_locator(Some(text), defaults.as_ref())?;
        if let Some(item) = self.find_single_item(&mut locator)? {
            self.check_processed(&locator)?;
            return Ok(item);
        }
        reject_unhandled_single_value(&locator)?;

        let mut filter = self.get_filter(&mut locator)?;
        filter.set_bounds(PagingBounds {
            start: None,
            count: Some(2),
            lookup_limit: None,
        });
        let items = self.get_prefiltered_items(&mut locator)?;
        self.check_processed(&locator)?;

        let mut processor = FilterItemProcessor::new(&filter);
        processor.process(items);
        let mut found = processor.into_result().items;
        match found.len() {
            0 => Err(Error::NotFound(text.trim().to_string())),
            1 => found.pop().ok_or_else(|| Error::NotFound(text.trim().to_string())),
            _ => Err(Error::AmbiguousResult {
                locator: text.trim().to_string(),
            }),
        }
    }
}

/// A single value that [`Finder::find_single_item`] left unread cannot be
/// answered by filtering.
fn reject_unhandled_single_value(locator: &Locator) -> Result<()> {
    if locator.is_single_value()
        && locator
            .unused_dimensions()
            .iter()
            .any(|d| d == SINGLE_VALUE_DIMENSION)
    {
        return Err(Error::InvalidLocator(format!(
            "single value locator '{locator}' is not supported"
        )));
    }
    if locator.is_single_value() {
        return Err(Error::NotFound(locator.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
