// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locator parsing and dimension tracking.
//!
//! A locator is either a bare single value or a comma-separated list of
//! `name:value` pairs:
//!
//! ```text
//! 42                               # single value (usually an id)
//! name:agent1,connected:true       # two dimensions
//! pool:(id:3),defaultFilter:false  # nested locator value
//! tag:a,tag:b                      # repeated dimension, values kept in order
//! ```
//!
//! Commas and colons only separate at parenthesis depth 0, so a value wrapped
//! in parentheses can hold a whole locator of its own.
//!
//! Every accessor marks the dimension it reads as used. After a finder has
//! compiled its filter, [`Locator::check_locator_fully_processed`] reports any
//! dimension nobody looked at, which turns client typos into errors instead
//! of silently ignored input.

use std::fmt;

use crate::error::{Error, Result};

/// Name that, when declared, permits the bare single-value form.
pub const SINGLE_VALUE_DIMENSION: &str = "$singleValue";

/// The dimensions a locator is allowed to carry.
///
/// Hidden dimensions are accepted like supported ones but do not count when
/// deciding whether a locator is empty, and are never reported as unused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionSet {
    supported: Vec<String>,
    hidden: Vec<String>,
}

impl DimensionSet {
    /// Creates a set from the supported dimension names.
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DimensionSet {
            supported: supported.into_iter().map(Into::into).collect(),
            hidden: Vec::new(),
        }
    }

    /// Adds hidden dimensions (e.g. paging dimensions added by the framework).
    pub fn with_hidden<I, S>(mut self, hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in hidden {
            let name = name.into();
            if !self.hidden.contains(&name) {
                self.hidden.push(name);
            }
        }
        self
    }

    /// Adds a supported dimension if not already present.
    pub fn with_supported(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.supported.contains(&name) {
            self.supported.push(name);
        }
        self
    }

    /// Returns true if the bare single-value form is permitted.
    pub fn allows_single_value(&self) -> bool {
        self.supported.iter().any(|s| s == SINGLE_VALUE_DIMENSION)
    }

    /// Returns true if `name` is supported or hidden.
    pub fn contains(&self, name: &str) -> bool {
        self.supported.iter().chain(self.hidden.iter()).any(|s| s == name)
    }

    /// Hidden dimension names.
    pub fn hidden(&self) -> &[String] {
        &self.hidden
    }

    /// Supported names for error hints (the single-value marker is omitted).
    pub fn describe(&self) -> String {
        self.supported
            .iter()
            .filter(|s| s.as_str() != SINGLE_VALUE_DIMENSION)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A parsed locator.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    raw: String,
    dimensions: Vec<(String, Vec<String>)>,
    single_value: Option<String>,
    unused: Vec<String>,
    hidden: Vec<String>,
}

impl Locator {
    /// Parses locator text.
    ///
    /// When `declared` is given, every dimension name must be supported or
    /// hidden in it, and the single-value form is only accepted if the set
    /// declares [`SINGLE_VALUE_DIMENSION`]. `defaults` fill in dimensions
    /// absent from the text; they are ignored for single-value locators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LocatorSyntax`] for empty text, unbalanced
    /// parentheses, empty or malformed pairs, and [`Error::UnsupportedDimension`]
    /// for names outside `declared`.
    pub fn parse(
        text: &str,
        declared: Option<&DimensionSet>,
        defaults: Option<&Locator>,
    ) -> Result<Locator> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(syntax(text, "empty locator is not supported"));
        }

        let segments = split_top_level(trimmed).map_err(|reason| syntax(trimmed, reason))?;

        let mut locator = Locator {
            raw: trimmed.to_string(),
            hidden: declared.map(|d| d.hidden().to_vec()).unwrap_or_default(),
            ..Locator::default()
        };

        if segments.len() == 1 && find_top_level_colon(segments[0]).is_none() {
            if let Some(set) = declared {
                if !set.allows_single_value() {
                    return Err(syntax(
                        trimmed,
                        "single value locator is not supported here",
                    ));
                }
            }
            locator.single_value = Some(unwrap_parens(segments[0].trim()).to_string());
            locator.unused.push(SINGLE_VALUE_DIMENSION.to_string());
            tracing::debug!(locator = trimmed, "parsed single value locator");
            return Ok(locator);
        }

        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(syntax(trimmed, "empty dimension"));
            }
            let colon = find_top_level_colon(segment).ok_or_else(|| {
                syntax(
                    trimmed,
                    format!("dimension '{segment}' has no value, expected name:value"),
                )
            })?;
            let name = segment[..colon].trim();
            if name.is_empty() {
                return Err(syntax(trimmed, "empty dimension name"));
            }
            if !is_valid_name(name) {
                return Err(syntax(trimmed, format!("invalid dimension name '{name}'")));
            }
            if name == SINGLE_VALUE_DIMENSION {
                return Err(syntax(
                    trimmed,
                    format!("'{name}' is reserved, write the value without a name"),
                ));
            }
            if let Some(set) = declared {
                if !set.contains(name) {
                    return Err(Error::UnsupportedDimension {
                        dimension: name.to_string(),
                        supported: set.describe(),
                    });
                }
            }
            let value = unwrap_parens(segment[colon + 1..].trim());
            locator.push_value(name, value.to_string());
        }

        if let Some(defaults) = defaults {
            locator.apply_defaults(defaults);
        }

        tracing::debug!(
            locator = trimmed,
            dimensions = ?locator.dimension_names(),
            "parsed locator"
        );
        Ok(locator)
    }

    /// Parses locator text without dimension validation or defaults.
    pub fn parse_text(text: &str) -> Result<Locator> {
        Locator::parse(text, None, None)
    }

    /// Creates a locator with no dimensions.
    pub fn empty() -> Locator {
        Locator::default()
    }

    /// Creates a bare single-value locator.
    pub fn from_single_value(value: impl Into<String>) -> Locator {
        let value = value.into();
        Locator {
            raw: value.clone(),
            single_value: Some(value),
            unused: vec![SINGLE_VALUE_DIMENSION.to_string()],
            ..Locator::default()
        }
    }

    /// Builder form of [`Locator::set_dimension`].
    pub fn with_dimension(mut self, name: &str, value: impl Into<String>) -> Locator {
        self.set_dimension(name, value);
        self
    }

    /// Sets a dimension only if it is absent.
    pub fn set_dimension(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        if !self.has_dimension(name) {
            self.push_value(name, value.into());
        }
        self
    }

    /// Replaces all values of a dimension.
    pub fn set_dimension_forced(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        match self.dimensions.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => *values = vec![value.into()],
            None => self.push_value(name, value.into()),
        }
        self
    }

    /// Marks dimensions as accepted but not counted by [`Locator::is_empty`].
    pub fn add_hidden_dimensions(&mut self, names: &[&str]) {
        for name in names {
            if !self.hidden.iter().any(|h| h == name) {
                self.hidden.push((*name).to_string());
            }
        }
    }

    /// Returns the original locator text.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Returns true for the bare single-value form.
    pub fn is_single_value(&self) -> bool {
        self.single_value.is_some()
    }

    /// Returns true when no visible dimension and no single value is present.
    pub fn is_empty(&self) -> bool {
        self.single_value.is_none()
            && self
                .dimensions
                .iter()
                .all(|(name, _)| self.hidden.contains(name))
    }

    /// Returns true if the dimension is present, without marking it used.
    pub fn has_dimension(&self, name: &str) -> bool {
        self.dimensions.iter().any(|(n, _)| n == name)
    }

    /// Dimension names in encounter order.
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns the bare single value and marks it used.
    pub fn get_single_value(&mut self) -> Option<String> {
        self.mark_used(&[SINGLE_VALUE_DIMENSION]);
        self.single_value.clone()
    }

    /// Returns all values of a dimension in encounter order and marks it used.
    pub fn get_dimension_value(&mut self, name: &str) -> Vec<String> {
        self.mark_used(&[name]);
        self.values(name).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Returns the value of a single-valued dimension and marks it used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousDimension`] if the dimension has several values.
    pub fn get_single_dimension_value(&mut self, name: &str) -> Result<Option<String>> {
        self.mark_used(&[name]);
        match self.values(name) {
            None => Ok(None),
            Some([value]) => Ok(Some(value.clone())),
            Some(values) => Err(Error::AmbiguousDimension {
                dimension: name.to_string(),
                count: values.len(),
            }),
        }
    }

    /// Returns a single-valued dimension parsed as an integer.
    pub fn get_single_dimension_value_as_long(&mut self, name: &str) -> Result<Option<i64>> {
        match self.get_single_dimension_value(name)? {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| Error::bad_value(name, &value, "expected an integer")),
        }
    }

    /// Like [`Locator::get_single_dimension_value_as_long`] with a fallback.
    pub fn get_single_dimension_value_as_long_or(&mut self, name: &str, default: i64) -> Result<i64> {
        Ok(self
            .get_single_dimension_value_as_long(name)?
            .unwrap_or(default))
    }

    /// Returns a tri-state boolean dimension: `true`, `false` or `any` (`None`).
    ///
    /// An absent dimension is also `None`.
    pub fn get_single_dimension_value_as_bool(&mut self, name: &str) -> Result<Option<bool>> {
        self.get_single_dimension_value_as_bool_or(name, None)
    }

    /// Like [`Locator::get_single_dimension_value_as_bool`], returning
    /// `default` when the dimension is absent.
    pub fn get_single_dimension_value_as_bool_or(
        &mut self,
        name: &str,
        default: Option<bool>,
    ) -> Result<Option<bool>> {
        match self.get_single_dimension_value(name)? {
            None => Ok(default),
            Some(value) => parse_bool_value(name, &value),
        }
    }

    /// Parses a single-valued dimension as a nested locator.
    pub fn get_nested(&mut self, name: &str) -> Result<Option<Locator>> {
        self.get_single_dimension_value(name)?
            .map(|text| Locator::parse_text(&text))
            .transpose()
    }

    /// Parses every value of a dimension as a nested locator.
    pub fn get_nested_all(&mut self, name: &str) -> Result<Vec<Locator>> {
        self.get_dimension_value(name)
            .iter()
            .map(|text| Locator::parse_text(text))
            .collect()
    }

    /// Marks dimensions as used without reading them.
    pub fn mark_used(&mut self, names: &[&str]) {
        self.unused.retain(|u| !names.contains(&u.as_str()));
    }

    /// Marks every dimension as used.
    pub fn mark_all_used(&mut self) {
        self.unused.clear();
    }

    /// Dimensions not yet read, excluding hidden ones.
    pub fn unused_dimensions(&self) -> Vec<String> {
        self.unused
            .iter()
            .filter(|u| !self.hidden.contains(u))
            .cloned()
            .collect()
    }

    /// Fails if any non-hidden dimension was never read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDimensions`] listing the ignored dimensions.
    pub fn check_locator_fully_processed(&self) -> Result<()> {
        let unused = self.unused_dimensions();
        if unused.is_empty() {
            return Ok(());
        }
        let dimensions = unused
            .into_iter()
            .map(|name| {
                if name == SINGLE_VALUE_DIMENSION {
                    format!(
                        "single value '{}'",
                        self.single_value.as_deref().unwrap_or_default()
                    )
                } else {
                    name
                }
            })
            .collect();
        let locator = if self.raw.is_empty() {
            self.to_string()
        } else {
            self.raw.clone()
        };
        Err(Error::UnknownDimensions {
            dimensions,
            locator,
        })
    }

    fn values(&self, name: &str) -> Option<&[String]> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    fn push_value(&mut self, name: &str, value: String) {
        match self.dimensions.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value),
            None => {
                self.dimensions.push((name.to_string(), vec![value]));
                self.unused.push(name.to_string());
            }
        }
    }

    /// Copies dimensions from `defaults` that this locator lacks.
    ///
    /// Single-value locators are left untouched.
    pub fn apply_defaults(&mut self, defaults: &Locator) {
        if self.is_single_value() {
            return;
        }
        for (name, values) in &defaults.dimensions {
            if !self.has_dimension(name) {
                for value in values {
                    self.push_value(name, value.clone());
                }
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.single_value {
            return write_value(f, value);
        }
        let mut first = true;
        for (name, values) in &self.dimensions {
            for value in values {
                if !first {
                    f.write_str(",")?;
                }
                first = false;
                write!(f, "{name}:")?;
                write_value(f, value)?;
            }
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if value.contains([',', ':', '(', ')']) {
        write!(f, "({value})")
    } else {
        f.write_str(value)
    }
}

fn syntax(locator: &str, reason: impl Into<String>) -> Error {
    Error::LocatorSyntax {
        locator: locator.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool_value(name: &str, value: &str) -> Result<Option<bool>> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        "any" => Ok(None),
        _ => Err(Error::bad_value(
            name,
            value,
            "expected 'true', 'false' or 'any'",
        )),
    }
}

fn is_valid_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$'))
}

/// Splits on commas at depth 0, validating parenthesis balance.
fn split_top_level(text: &str) -> std::result::Result<Vec<&str>, String> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced ')' at position {i}"))?;
            }
            ',' if depth == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(format!("{depth} unclosed '('"));
    }
    segments.push(&text[start..]);
    Ok(segments)
}

/// Byte index of the first colon at parenthesis depth 0.
fn find_top_level_colon(segment: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in segment.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Strips one pair of enclosing parentheses when they wrap the whole value.
fn unwrap_parens(value: &str) -> &str {
    if !(value.starts_with('(') && value.ends_with(')')) {
        return value;
    }
    let mut depth = 0usize;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return if i == value.len() - 1 {
                        &value[1..i]
                    } else {
                        value
                    };
                }
            }
            _ => {}
        }
    }
    value
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
