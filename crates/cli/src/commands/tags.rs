// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::Finder;

use super::Session;
use crate::cli::OutputFormat;
use crate::display::format_page;
use crate::error::Result;
use crate::finders::TagFinder;

/// Lists the tags of the build found by `build` that match `locator`.
///
/// Only public tags are listed unless the locator mentions `private`.
pub fn run(session: &Session, build: &str, locator: Option<&str>, format: OutputFormat) -> Result<String> {
    let ctx = session.context()?;
    let build = ctx.builds().get_item(build)?;
    tracing::debug!(build = build.id, tags = build.tags.len(), "listing tags");
    format_page(&TagFinder::new(ctx, build).get_items(locator)?, format)
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
