// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the lokrs library.
///
/// Query errors come from the locator engine unchanged; the remaining
/// variants cover loading configuration and the catalog.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] lk_core::Error),

    #[error("no catalog configured\n  hint: pass --catalog, set LOK_CATALOG, or add 'catalog = \"path\"' to lok.toml")]
    CatalogNotConfigured,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code: 2 for rejected queries, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Query(e) if e.is_client_error() => 2,
            _ => 1,
        }
    }
}

/// A specialized Result type for lokrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
