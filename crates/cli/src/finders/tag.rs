// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::cmp::Ordering;

use lk_core::{
    is_included_by_boolean_filter, Dimension, Finder, FinderOptions, ItemIter, Locator,
    MultiCheckerFilter, Result,
};

use super::{check_nested, FinderContext};
use crate::models::{Build, Tag};
use TagDimension as D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDimension {
    Name,
    Private,
    Owner,
}

impl Dimension for TagDimension {
    fn name(self) -> &'static str {
        match self {
            TagDimension::Name => "name",
            TagDimension::Private => "private",
            TagDimension::Owner => "owner",
        }
    }

    fn all() -> &'static [Self] {
        &[TagDimension::Name, TagDimension::Private, TagDimension::Owner]
    }
}

/// Finds the tags of one build.
///
/// Public tags come first by label, then private tags grouped by owner.
/// Only public tags are returned unless `private` is given.
pub struct TagFinder<'c> {
    build: &'c Build,
    options: FinderOptions,
}

impl<'c> TagFinder<'c> {
    pub fn new(ctx: FinderContext<'c>, build: &'c Build) -> Self {
        let options = ctx
            .options
            .clone()
            .with_single_value(false)
            .with_default_count(None);
        TagFinder { build, options }
    }
}

impl<'c> Finder for TagFinder<'c> {
    type Item = &'c Tag;
    type Dimension = TagDimension;

    const KIND: &'static str = "tag";

    fn options(&self) -> &FinderOptions {
        &self.options
    }

    fn default_locator(&self) -> Option<Locator> {
        Some(TagCondition::default_locator())
    }

    fn get_filter<'a>(&'a self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, &'c Tag>> {
        let mut filter = self.paged_filter(locator)?;
        let condition = TagCondition::from_locator(locator)?;
        if !condition.is_empty() {
            filter.add(move |t: &&Tag| condition.matches(t));
        }
        Ok(filter)
    }

    fn get_all_items(&self) -> Result<ItemIter<'_, &'c Tag>> {
        let mut tags: Vec<&'c Tag> = self.build.tags.iter().collect();
        tags.sort_by(|a, b| compare_tags(a, b));
        Ok(Box::new(tags.into_iter()))
    }
}

/// Compiled `name` / `private` / `owner` conditions.
///
/// Also used by the build `tag` dimension, where a bare value is a tag name.
#[derive(Debug, Clone, Default)]
pub(crate) struct TagCondition {
    name: Option<String>,
    private: Option<bool>,
    owner: Option<String>,
}

impl TagCondition {
    fn default_locator() -> Locator {
        Locator::empty().with_dimension(D::Private.name(), "false")
    }

    pub(crate) fn from_locator(locator: &mut Locator) -> Result<Self> {
        Ok(TagCondition {
            name: locator.get_single_dimension_value(D::Name.name())?,
            private: locator.get_single_dimension_value_as_bool(D::Private.name())?,
            owner: locator.get_single_dimension_value(D::Owner.name())?,
        })
    }

    /// Parses one value of a build's `tag` dimension.
    pub(crate) fn from_build_dimension(dimension: &str, text: &str) -> Result<Self> {
        let mut parsed = Locator::parse_text(text)?;
        let mut locator = match parsed.get_single_value() {
            Some(name) => Locator::empty().with_dimension(D::Name.name(), name),
            None => parsed,
        };
        locator.apply_defaults(&TagCondition::default_locator());
        let condition = TagCondition::from_locator(&mut locator)?;
        check_nested(dimension, &locator)?;
        Ok(condition)
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.private.is_none() && self.owner.is_none()
    }

    pub(crate) fn matches(&self, tag: &Tag) -> bool {
        if let Some(name) = &self.name {
            if !eq_ignore_case(name, &tag.label) {
                return false;
            }
        }
        if !is_included_by_boolean_filter(self.private, tag.is_private()) {
            return false;
        }
        match (&self.owner, &tag.owner) {
            (None, _) => true,
            // `private:any,owner:<user>` keeps public tags too.
            (Some(_), None) => self.private.is_none(),
            (Some(wanted), Some(owner)) => eq_ignore_case(wanted, owner),
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_tags(a: &Tag, b: &Tag) -> Ordering {
    let by_label = || cmp_ignore_case(&a.label, &b.label);
    match (&a.owner, &b.owner) {
        (None, None) => by_label(),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) if x == y => by_label(),
        (Some(x), Some(y)) => cmp_ignore_case(x, y).then_with(by_label),
    }
}

#[cfg(test)]
#[path = "tag_tests.rs"]
mod tests;
