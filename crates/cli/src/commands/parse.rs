// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::Locator;

use crate::error::Result;

/// Shows how a locator is split into dimensions, without querying anything.
///
/// Values that are themselves locators are expanded below their dimension.
pub fn run(text: &str) -> Result<String> {
    let mut locator = Locator::parse_text(text)?;
    let mut lines = Vec::new();
    render(&mut locator, 0, &mut lines);
    Ok(lines.join("\n"))
}

fn render(locator: &mut Locator, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    if let Some(value) = locator.get_single_value() {
        lines.push(format!("{indent}single value: {value}"));
        return;
    }
    let names: Vec<String> = locator.dimension_names().into_iter().map(str::to_string).collect();
    for name in names {
        for value in locator.get_dimension_value(&name) {
            match nested(&value) {
                Some(mut inner) => {
                    lines.push(format!("{indent}{name}:"));
                    render(&mut inner, depth + 1, lines);
                }
                None => lines.push(format!("{indent}{name}: {value}")),
            }
        }
    }
}

/// A value that parses as a locator with dimensions of its own.
///
/// Names must start with a letter, so timestamps such as
/// `2024-03-01T10:00:00Z` stay whole.
fn nested(value: &str) -> Option<Locator> {
    Locator::parse_text(value).ok().filter(|l| {
        !l.is_single_value()
            && l.dimension_names()
                .iter()
                .all(|name| name.starts_with(char::is_alphabetic))
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
