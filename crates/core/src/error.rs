// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lk-core operations.

use thiserror::Error;

/// All possible errors raised while parsing locators or resolving items.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid locator '{locator}': {reason}")]
    LocatorSyntax { locator: String, reason: String },

    #[error("unsupported dimension '{dimension}'\n  hint: supported dimensions are: {supported}")]
    UnsupportedDimension {
        dimension: String,
        supported: String,
    },

    #[error("locator '{locator}' has unknown or ignored dimension(s): {}", dimensions.join(", "))]
    UnknownDimensions {
        dimensions: Vec<String>,
        locator: String,
    },

    #[error("dimension '{dimension}' is given {count} times, only one value is supported")]
    AmbiguousDimension { dimension: String, count: usize },

    #[error("invalid value '{value}' for dimension '{dimension}': {reason}")]
    BadLocatorValue {
        dimension: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    InvalidLocator(String),

    #[error("error processing '{dimension}' locator '{locator}': {source}")]
    TimeCondition {
        dimension: String,
        locator: String,
        #[source]
        source: Box<Error>,
    },

    #[error("nothing is found by locator '{0}'")]
    NotFound(String),

    #[error("several items match locator '{locator}'\n  hint: use the list form or narrow the locator")]
    AmbiguousResult { locator: String },

    #[error("access denied: '{permission}' is required for '{scope}'")]
    AccessDenied { permission: String, scope: String },

    #[error("item source error: {0}")]
    Source(String),
}

impl Error {
    /// True for errors caused by the query itself rather than the environment.
    ///
    /// Client errors are reported back and never retried.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::LocatorSyntax { .. }
            | Error::UnsupportedDimension { .. }
            | Error::UnknownDimensions { .. }
            | Error::AmbiguousDimension { .. }
            | Error::BadLocatorValue { .. }
            | Error::InvalidLocator(_)
            | Error::NotFound(_)
            | Error::AmbiguousResult { .. } => true,
            Error::TimeCondition { source, .. } => source.is_client_error(),
            Error::AccessDenied { .. } | Error::Source(_) => false,
        }
    }

    /// Shorthand for [`Error::BadLocatorValue`].
    pub fn bad_value(dimension: &str, value: &str, reason: impl Into<String>) -> Self {
        Error::BadLocatorValue {
            dimension: dimension.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for lk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
