// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};

use lk_core::{
    is_included_by_boolean_filter, Dimension, Error, Finder, FinderOptions, FinderTimeReference,
    ItemIter, Locator, MultiCheckerFilter, Result,
};

use super::tag::TagCondition;
use super::{parse_id, single_id, FinderContext};
use crate::models::{Build, BuildStatus};
use crate::permissions::VIEW_PROJECT;
use BuildDimension as D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDimension {
    Id,
    Number,
    BuildType,
    Project,
    Status,
    Branch,
    Personal,
    Canceled,
    Running,
    Pinned,
    Tag,
    QueuedDate,
    StartDate,
    FinishDate,
    DefaultFilter,
}

impl Dimension for BuildDimension {
    fn name(self) -> &'static str {
        match self {
            BuildDimension::Id => "id",
            BuildDimension::Number => "number",
            BuildDimension::BuildType => "buildType",
            BuildDimension::Project => "project",
            BuildDimension::Status => "status",
            BuildDimension::Branch => "branch",
            BuildDimension::Personal => "personal",
            BuildDimension::Canceled => "canceled",
            BuildDimension::Running => "running",
            BuildDimension::Pinned => "pinned",
            BuildDimension::Tag => "tag",
            BuildDimension::QueuedDate => "queuedDate",
            BuildDimension::StartDate => "startDate",
            BuildDimension::FinishDate => "finishDate",
            BuildDimension::DefaultFilter => "defaultFilter",
        }
    }

    fn all() -> &'static [Self] {
        &[
            BuildDimension::Id,
            BuildDimension::Number,
            BuildDimension::BuildType,
            BuildDimension::Project,
            BuildDimension::Status,
            BuildDimension::Branch,
            BuildDimension::Personal,
            BuildDimension::Canceled,
            BuildDimension::Running,
            BuildDimension::Pinned,
            BuildDimension::Tag,
            BuildDimension::QueuedDate,
            BuildDimension::StartDate,
            BuildDimension::FinishDate,
            BuildDimension::DefaultFilter,
        ]
    }
}

type TimeExtractor = fn(&&Build) -> Option<DateTime<Utc>>;

fn queued_time(build: &&Build) -> Option<DateTime<Utc>> {
    build.queued_time()
}

fn start_time(build: &&Build) -> Option<DateTime<Utc>> {
    build.start_time()
}

fn finish_time(build: &&Build) -> Option<DateTime<Utc>> {
    build.finish_time()
}

/// Finds builds, newest first.
///
/// Unless `defaultFilter:false` is given, personal, canceled and running
/// builds are skipped when the locator does not mention them. Builds of
/// projects the caller cannot view are never returned.
pub struct BuildFinder<'c> {
    ctx: FinderContext<'c>,
}

impl<'c> BuildFinder<'c> {
    pub fn new(ctx: FinderContext<'c>) -> Self {
        BuildFinder { ctx }
    }

    fn can_view(&self, build: &Build) -> bool {
        self.ctx.permissions.is_permitted(VIEW_PROJECT, &build.project)
    }

    /// Adds a tri-state flag filter; `implied` applies when the dimension is
    /// absent and the default filter is on.
    fn add_flag<'a>(
        filter: &mut MultiCheckerFilter<'a, &'c Build>,
        locator: &mut Locator,
        dimension: BuildDimension,
        implied: Option<bool>,
        flag: fn(&Build) -> bool,
    ) -> Result<()> {
        let name = dimension.name();
        let mut expected = locator.get_single_dimension_value_as_bool(name)?;
        if expected.is_none() && !locator.has_dimension(name) {
            expected = implied;
        }
        if expected.is_some() {
            filter.add(move |b: &&Build| is_included_by_boolean_filter(expected, flag(b)));
        }
        Ok(())
    }

    /// Adds the conditions of one time dimension; returns its limiting date.
    fn add_time<'a>(
        &'a self,
        filter: &mut MultiCheckerFilter<'a, &'c Build>,
        locator: &mut Locator,
        dimension: BuildDimension,
        extractor: TimeExtractor,
    ) -> Result<Option<DateTime<Utc>>> {
        let reference = FinderTimeReference::new(self, extractor);
        let Some(conditions) = self.ctx.time.process_time_conditions(
            dimension.name(),
            locator,
            extractor,
            Some(&reference),
        )?
        else {
            return Ok(None);
        };
        filter.add(conditions.filter.into_predicate());
        Ok(conditions.limiting_date)
    }
}

impl<'c> Finder for BuildFinder<'c> {
    type Item = &'c Build;
    type Dimension = BuildDimension;

    const KIND: &'static str = "build";

    fn options(&self) -> &FinderOptions {
        self.ctx.options
    }

    /// A bare value is a build id.
    fn find_single_item(&self, locator: &mut Locator) -> Result<Option<&'c Build>> {
        let Some(value) = locator.get_single_value() else {
            return Ok(None);
        };
        let id = parse_id(D::Id.name(), &value)?;
        let build = self
            .ctx
            .catalog
            .build(id)
            .ok_or_else(|| Error::NotFound(value.clone()))?;
        self.ctx.permissions.check_permission(VIEW_PROJECT, &build.project)?;
        Ok(Some(build))
    }

    fn get_filter<'a>(&'a self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, &'c Build>> {
        let mut filter = self.paged_filter(locator)?;

        filter.add(move |b: &&Build| self.can_view(b));

        if let Some(id) = single_id(locator, D::Id.name())? {
            filter.add(move |b: &&Build| b.id == id);
        }

        if let Some(number) = locator.get_single_dimension_value(D::Number.name())? {
            filter.add(move |b: &&Build| b.number == number);
        }

        if let Some(build_type) = locator.get_single_dimension_value(D::BuildType.name())? {
            filter.add(move |b: &&Build| b.build_type == build_type);
        }

        if let Some(project) = locator.get_single_dimension_value(D::Project.name())? {
            self.ctx.permissions.check_permission(VIEW_PROJECT, &project)?;
            filter.add(move |b: &&Build| b.project == project);
        }

        if let Some(status) = locator.get_single_dimension_value(D::Status.name())? {
            let status: BuildStatus = status
                .parse()
                .map_err(|reason: String| Error::bad_value(D::Status.name(), &status, reason))?;
            filter.add(move |b: &&Build| b.status == status);
        }

        if let Some(branch) = locator.get_single_dimension_value(D::Branch.name())? {
            filter.add(move |b: &&Build| b.branch.as_deref() == Some(branch.as_str()));
        }

        let default_filter =
            locator.get_single_dimension_value_as_bool_or(D::DefaultFilter.name(), Some(true))?;
        let implied = (default_filter == Some(true)).then_some(false);
        Self::add_flag(&mut filter, locator, D::Personal, implied, |b| b.personal)?;
        Self::add_flag(&mut filter, locator, D::Canceled, implied, |b| b.canceled)?;
        Self::add_flag(&mut filter, locator, D::Running, implied, |b| b.running)?;
        Self::add_flag(&mut filter, locator, D::Pinned, None, |b| b.pinned)?;

        for text in locator.get_dimension_value(D::Tag.name()) {
            let condition = TagCondition::from_build_dimension(D::Tag.name(), &text)?;
            filter.add(move |b: &&Build| b.tags.iter().any(|t| condition.matches(t)));
        }

        let queued_since = self.add_time(&mut filter, locator, D::QueuedDate, queued_time)?;
        self.add_time(&mut filter, locator, D::StartDate, start_time)?;
        self.add_time(&mut filter, locator, D::FinishDate, finish_time)?;

        // Candidates come by id, newest first. Only when queue times follow
        // that order is nothing past the limiting date able to match.
        if let Some(since) = queued_since {
            if self.ctx.catalog.builds_queued_in_id_order() {
                filter.set_stop_condition(move |b: &&Build| b.queued < since);
            } else {
                tracing::debug!("queue times out of id order, scanning every build");
            }
        }

        Ok(filter)
    }

    fn get_all_items(&self) -> Result<ItemIter<'_, &'c Build>> {
        let mut builds: Vec<&'c Build> = self.ctx.catalog.builds.iter().collect();
        builds.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(Box::new(builds.into_iter()))
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
