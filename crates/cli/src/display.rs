// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of query results.

use serde::Serialize;
use serde_json::json;

use lk_core::PagedSearchResult;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{Agent, Build, Change, Tag};

/// An item that can be printed as one line of columns.
pub trait Row: Serialize {
    /// The value printed for `-o ids`.
    fn key(&self) -> String;

    /// Columns for text output, joined by two spaces.
    fn columns(&self) -> Vec<String>;
}

fn flags(pairs: &[(bool, &str)]) -> String {
    let set: Vec<&str> = pairs.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
    if set.is_empty() {
        "-".to_string()
    } else {
        set.join(",")
    }
}

impl Row for Agent {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("pool={}", self.pool),
            flags(&[
                (self.connected, "connected"),
                (self.authorized, "authorized"),
                (self.enabled, "enabled"),
            ]),
        ]
    }
}

impl Row for Build {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format!("#{}", self.number),
            self.build_type.clone(),
            self.status.to_string(),
            self.branch.clone().unwrap_or_else(|| "-".to_string()),
            flags(&[
                (self.personal, "personal"),
                (self.canceled, "canceled"),
                (self.running, "running"),
                (self.pinned, "pinned"),
            ]),
            self.queued.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

impl Row for Change {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.version.clone(),
            self.vcs_root.clone(),
            self.user.clone().unwrap_or_else(|| "-".to_string()),
            self.date.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

impl Row for Tag {
    fn key(&self) -> String {
        self.label.clone()
    }

    fn columns(&self) -> Vec<String> {
        let visibility = match &self.owner {
            Some(owner) => format!("private:{owner}"),
            None => "public".to_string(),
        };
        vec![self.label.clone(), visibility]
    }
}

/// Renders one page of results.
///
/// Text output ends with a `# start=N count=M processed=P` footer.
pub fn format_page<T: Row>(result: &PagedSearchResult<&T>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut lines: Vec<String> = result.items.iter().map(|item| item.columns().join("  ")).collect();
            lines.push(format!(
                "# start={} count={} processed={}",
                result.start,
                result.len(),
                result.processed
            ));
            if let Some(next) = result.next_start() {
                lines.push(format!("# next page: start={next}"));
            }
            if result.lookup_limit_reached {
                lines.push("# lookup limit reached, more items may match".to_string());
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Ids => Ok(result
            .items
            .iter()
            .map(|item| item.key())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let value = json!({
                "items": result.items,
                "start": result.start,
                "count": result.len(),
                "processed": result.processed,
                "lookupLimitReached": result.lookup_limit_reached,
                "nextStart": result.next_start(),
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}

/// Renders a single item.
pub fn format_item<T: Row>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(item.columns().join("  ")),
        OutputFormat::Ids => Ok(item.key()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
