// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Item predicates and their combinators.
//!
//! Predicates must be pure: evaluating the same item twice gives the same
//! answer. Combinators never reorder items; ordering is owned by the
//! candidate source.

use crate::paging::PagingBounds;

/// A boxed item predicate.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A predicate over candidate items with optional paging bounds.
pub trait Filter<T> {
    /// Returns true if the item matches.
    fn is_included(&self, item: &T) -> bool;

    /// Paging bounds applied to matching items.
    fn bounds(&self) -> PagingBounds {
        PagingBounds::unbounded()
    }

    /// Returns true if no item from here on can match, ending the scan.
    ///
    /// Used with time-ordered candidate sources to stop at a limiting date.
    fn should_stop(&self, _item: &T) -> bool {
        false
    }
}

/// Tri-state boolean match: `None` accepts anything.
pub fn is_included_by_boolean_filter(expected: Option<bool>, actual: bool) -> bool {
    expected.is_none_or(|expected| expected == actual)
}

/// Sub-predicates ANDed together, plus paging bounds and an optional stop
/// condition.
pub struct MultiCheckerFilter<'a, T> {
    bounds: PagingBounds,
    checkers: Vec<Predicate<'a, T>>,
    stop: Option<Predicate<'a, T>>,
}

impl<'a, T> MultiCheckerFilter<'a, T> {
    pub fn new(bounds: PagingBounds) -> Self {
        MultiCheckerFilter {
            bounds,
            checkers: Vec::new(),
            stop: None,
        }
    }

    /// A filter without bounds that matches everything until checkers are added.
    pub fn unbounded() -> Self {
        MultiCheckerFilter::new(PagingBounds::unbounded())
    }

    /// Adds a sub-predicate.
    pub fn add(&mut self, checker: impl Fn(&T) -> bool + 'a) -> &mut Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Sets the stop condition, replacing any previous one.
    pub fn set_stop_condition(&mut self, stop: impl Fn(&T) -> bool + 'a) -> &mut Self {
        self.stop = Some(Box::new(stop));
        self
    }

    pub fn set_bounds(&mut self, bounds: PagingBounds) -> &mut Self {
        self.bounds = bounds;
        self
    }

    /// Number of sub-predicates.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl<T> Filter<T> for MultiCheckerFilter<'_, T> {
    fn is_included(&self, item: &T) -> bool {
        self.checkers.iter().all(|checker| checker(item))
    }

    fn bounds(&self) -> PagingBounds {
        self.bounds
    }

    fn should_stop(&self, item: &T) -> bool {
        self.stop.as_ref().is_some_and(|stop| stop(item))
    }
}

/// A pure AND over predicates, without bounds.
///
/// Evaluation stops at the first failing predicate.
pub struct AndedFilter<'a, T> {
    filters: Vec<Predicate<'a, T>>,
}

impl<'a, T> AndedFilter<'a, T> {
    pub fn new() -> Self {
        AndedFilter {
            filters: Vec::new(),
        }
    }

    pub fn add(&mut self, filter: impl Fn(&T) -> bool + 'a) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Converts into a single boxed predicate.
    pub fn into_predicate(self) -> Predicate<'a, T>
    where
        T: 'a,
    {
        Box::new(move |item| self.is_included(item))
    }
}

impl<T> Default for AndedFilter<'_, T> {
    fn default() -> Self {
        AndedFilter::new()
    }
}

impl<T> Filter<T> for AndedFilter<'_, T> {
    fn is_included(&self, item: &T) -> bool {
        self.filters.iter().all(|filter| filter(item))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
