// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lk-core: locator query engine
//!
//! This crate provides the locator mini-language, filter combinators, the
//! bounded filter processor, the generic finder protocol and time range
//! conditions used by entity finders. It performs no I/O of its own.

pub mod cache;
pub mod clock;
pub mod error;
pub mod filter;
pub mod finder;
pub mod locator;
pub mod paging;
pub mod permission;
pub mod processor;
pub mod time;

pub use cache::CachingValue;
pub use clock::{ClockSource, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use filter::{is_included_by_boolean_filter, AndedFilter, Filter, MultiCheckerFilter, Predicate};
pub use finder::{Dimension, Finder, FinderOptions, ItemIter};
pub use locator::{DimensionSet, Locator, SINGLE_VALUE_DIMENSION};
pub use paging::{PagedSearchResult, PagingBounds};
pub use permission::{AllowAll, PermissionChecker};
pub use processor::{FilterItemProcessor, StopReason};
pub use time::{
    DateCondition, FilterAndLimitingDate, FinderTimeReference, ParsedTimeCondition,
    TimeCondition, TimeMatcher, TimeReference, TimeWithPrecision,
};
