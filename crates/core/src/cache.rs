// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A value computed on first use and kept for the owner's lifetime.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

type Init<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// Lazily computed, memoized value.
///
/// The computation runs at most once even under concurrent first use: other
/// callers block until the winning initialization finishes. A failed
/// computation is not cached and will be retried by the next [`get`].
///
/// [`get`]: CachingValue::get
pub struct CachingValue<T> {
    cell: OnceCell<T>,
    init: Option<Init<T>>,
}

impl<T> CachingValue<T> {
    /// Wraps a computation to run on first [`CachingValue::get`].
    pub fn new(init: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        CachingValue {
            cell: OnceCell::new(),
            init: Some(Box::new(init)),
        }
    }

    /// Wraps an already known value.
    pub fn simple(value: T) -> Self {
        CachingValue {
            cell: OnceCell::with_value(value),
            init: None,
        }
    }

    /// Returns the value, computing it if this is the first successful call.
    ///
    /// # Errors
    ///
    /// Propagates the computation's error.
    pub fn get(&self) -> Result<&T> {
        self.cell.get_or_try_init(|| {
            let init = self
                .init
                .as_ref()
                .ok_or_else(|| Error::Source("cached value has no initializer".to_string()))?;
            init()
        })
    }

    /// Returns the value only if it has been computed already.
    pub fn get_if_computed(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for CachingValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingValue")
            .field("value", &self.cell.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
