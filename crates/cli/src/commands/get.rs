// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::Finder;

use super::Session;
use crate::cli::{Kind, OutputFormat};
use crate::display::format_item;
use crate::error::Result;

/// Shows the one item matching `locator`.
///
/// Fails when nothing or more than one item matches.
pub fn run(session: &Session, kind: Kind, locator: &str, format: OutputFormat) -> Result<String> {
    let ctx = session.context()?;
    match kind {
        Kind::Agent => format_item(ctx.agents().get_item(locator)?, format),
        Kind::Build => format_item(ctx.builds().get_item(locator)?, format),
        Kind::Change => format_item(ctx.changes().get_item(locator)?, format),
    }
}

#[cfg(test)]
#[path = "get_tests.rs"]
mod tests;
