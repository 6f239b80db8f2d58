// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming application of a filter to candidate items.

use crate::filter::Filter;
use crate::paging::{PagedSearchResult, PagingBounds};

/// Why a scan ended before the candidates ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `count` matching items were collected.
    CountReached,
    /// `lookupLimit` candidates were examined.
    LookupLimitReached,
    /// The filter's stop condition fired.
    StopCondition,
}

/// Feeds candidates through a filter, collecting the requested page.
///
/// Candidates are examined in the order given; the first `start` matches are
/// skipped and at most `count` matches are kept. Once the page is full, the
/// lookup limit is hit, or the stop condition fires, [`process_item`]
/// returns false and no further candidates are pulled by [`process`].
///
/// [`process_item`]: FilterItemProcessor::process_item
/// [`process`]: FilterItemProcessor::process
pub struct FilterItemProcessor<'f, T, F: Filter<T> + ?Sized> {
    filter: &'f F,
    bounds: PagingBounds,
    processed: u64,
    matched: u64,
    items: Vec<T>,
    stop_reason: Option<StopReason>,
}

impl<'f, T, F: Filter<T> + ?Sized> FilterItemProcessor<'f, T, F> {
    pub fn new(filter: &'f F) -> Self {
        let bounds = filter.bounds();
        let stop_reason = (bounds.count == Some(0)).then_some(StopReason::CountReached);
        FilterItemProcessor {
            filter,
            bounds,
            processed: 0,
            matched: 0,
            items: Vec::new(),
            stop_reason,
        }
    }

    /// Examines one candidate. Returns false when no more are wanted.
    pub fn process_item(&mut self, item: T) -> bool {
        if self.stop_reason.is_some() {
            return false;
        }
        if self
            .bounds
            .lookup_limit
            .is_some_and(|limit| self.processed >= limit)
        {
            self.stop_reason = Some(StopReason::LookupLimitReached);
            return false;
        }
        if self.filter.should_stop(&item) {
            self.stop_reason = Some(StopReason::StopCondition);
            return false;
        }

        self.processed += 1;
        if !self.filter.is_included(&item) {
            return true;
        }
        self.matched += 1;
        if self.matched <= self.bounds.start.unwrap_or(0) {
            return true;
        }

        self.items.push(item);
        if self
            .bounds
            .count
            .is_some_and(|count| self.items.len() as u64 >= count)
        {
            self.stop_reason = Some(StopReason::CountReached);
            return false;
        }
        true
    }

    /// Examines candidates until the source is exhausted or processing stops.
    pub fn process<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            if !self.process_item(item) {
                break;
            }
        }
        self
    }

    /// Candidates examined so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Candidates that matched so far, including skipped ones.
    pub fn matched(&self) -> u64 {
        self.matched
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Finishes processing and returns the collected page.
    pub fn into_result(self) -> PagedSearchResult<T> {
        let lookup_limit_reached = self.stop_reason == Some(StopReason::LookupLimitReached);
        if lookup_limit_reached {
            tracing::warn!(
                processed = self.processed,
                matched = self.matched,
                "lookup limit reached, result may be incomplete"
            );
        }
        tracing::debug!(
            processed = self.processed,
            matched = self.matched,
            returned = self.items.len(),
            stop = ?self.stop_reason,
            "filter processing finished"
        );
        PagedSearchResult {
            items: self.items,
            start: self.bounds.start.unwrap_or(0),
            count: self.bounds.count,
            processed: self.processed,
            lookup_limit_reached,
        }
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
