// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::Finder;

use super::Session;
use crate::cli::{Kind, OutputFormat};
use crate::display::format_page;
use crate::error::Result;

/// Lists one page of items matching `locator`.
pub fn run(session: &Session, kind: Kind, locator: Option<&str>, format: OutputFormat) -> Result<String> {
    let ctx = session.context()?;
    match kind {
        Kind::Agent => format_page(&ctx.agents().get_items(locator)?, format),
        Kind::Build => format_page(&ctx.builds().get_items(locator)?, format),
        Kind::Change => format_page(&ctx.changes().get_items(locator)?, format),
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
