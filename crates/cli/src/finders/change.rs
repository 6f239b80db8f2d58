// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};

use lk_core::{
    is_included_by_boolean_filter, Dimension, Error, Finder, FinderOptions, ItemIter, Locator,
    MultiCheckerFilter, Result,
};

use super::{check_nested, parse_id, single_id, FinderContext};
use crate::models::{Build, Change, Project, VcsRoot};
use crate::permissions::VIEW_PROJECT;
use ChangeDimension as D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDimension {
    Id,
    VcsRoot,
    Project,
    Build,
    SinceChange,
    User,
    Personal,
    Date,
}

impl Dimension for ChangeDimension {
    fn name(self) -> &'static str {
        match self {
            ChangeDimension::Id => "id",
            ChangeDimension::VcsRoot => "vcsRoot",
            ChangeDimension::Project => "project",
            ChangeDimension::Build => "build",
            ChangeDimension::SinceChange => "sinceChange",
            ChangeDimension::User => "user",
            ChangeDimension::Personal => "personal",
            ChangeDimension::Date => "date",
        }
    }

    fn all() -> &'static [Self] {
        &[
            ChangeDimension::Id,
            ChangeDimension::VcsRoot,
            ChangeDimension::Project,
            ChangeDimension::Build,
            ChangeDimension::SinceChange,
            ChangeDimension::User,
            ChangeDimension::Personal,
            ChangeDimension::Date,
        ]
    }
}

fn change_date(change: &&Change) -> Option<DateTime<Utc>> {
    Some(change.date)
}

/// Entities that narrow where changes are looked up.
#[derive(Default)]
struct Scope<'c> {
    build: Option<&'c Build>,
    root: Option<&'c VcsRoot>,
    project: Option<&'c Project>,
}

/// Finds VCS changes, newest first.
pub struct ChangeFinder<'c> {
    ctx: FinderContext<'c>,
}

impl<'c> ChangeFinder<'c> {
    pub fn new(ctx: FinderContext<'c>) -> Self {
        ChangeFinder { ctx }
    }

    fn can_view(&self, change: &Change) -> bool {
        self.ctx
            .catalog
            .change_project(change)
            .is_none_or(|project| self.ctx.permissions.is_permitted(VIEW_PROJECT, project))
    }

    /// Resolves the `build`, `vcsRoot` and `project` dimensions.
    fn scope(&self, locator: &mut Locator) -> Result<Scope<'c>> {
        let catalog = self.ctx.catalog;
        let permissions = self.ctx.permissions;
        let mut scope = Scope::default();

        if let Some(text) = locator.get_single_dimension_value(D::Build.name())? {
            scope.build = Some(self.ctx.builds().get_item(&text)?);
        }

        if let Some(mut nested) = locator.get_nested(D::VcsRoot.name())? {
            let id = match nested.get_single_value() {
                Some(id) => Some(id),
                None => nested.get_single_dimension_value("id")?,
            };
            check_nested(D::VcsRoot.name(), &nested)?;
            let id = id.ok_or_else(|| {
                Error::bad_value(D::VcsRoot.name(), &nested.to_string(), "expected a root id")
            })?;
            let root = catalog
                .vcs_root(&id)
                .ok_or_else(|| Error::NotFound(nested.to_string()))?;
            permissions.check_permission(VIEW_PROJECT, &root.project)?;
            scope.root = Some(root);
        }

        if let Some(id) = locator.get_single_dimension_value(D::Project.name())? {
            let project = catalog.project(&id).ok_or_else(|| Error::NotFound(id.clone()))?;
            permissions.check_permission(VIEW_PROJECT, &project.id)?;
            scope.project = Some(project);
        }

        Ok(scope)
    }
}

fn newest_first<'c>(changes: impl Iterator<Item = &'c Change>) -> ItemIter<'c, &'c Change> {
    let mut changes: Vec<&'c Change> = changes.collect();
    changes.sort_by(|a, b| b.id.cmp(&a.id));
    changes.dedup_by_key(|c| c.id);
    Box::new(changes.into_iter())
}

impl<'c> Finder for ChangeFinder<'c> {
    type Item = &'c Change;
    type Dimension = ChangeDimension;

    const KIND: &'static str = "change";

    fn options(&self) -> &FinderOptions {
        self.ctx.options
    }

    /// A bare value is a change id.
    fn find_single_item(&self, locator: &mut Locator) -> Result<Option<&'c Change>> {
        let Some(value) = locator.get_single_value() else {
            return Ok(None);
        };
        let id = parse_id(D::Id.name(), &value)?;
        let change = self
            .ctx
            .catalog
            .change(id)
            .ok_or_else(|| Error::NotFound(value.clone()))?;
        if let Some(project) = self.ctx.catalog.change_project(change) {
            self.ctx.permissions.check_permission(VIEW_PROJECT, project)?;
        }
        Ok(Some(change))
    }

    fn get_filter<'a>(&'a self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, &'c Change>> {
        let mut filter = self.paged_filter(locator)?;
        let catalog = self.ctx.catalog;

        filter.add(move |c: &&Change| self.can_view(c));

        if let Some(id) = single_id(locator, D::Id.name())? {
            filter.add(move |c: &&Change| c.id == id);
        }

        let scope = self.scope(locator)?;
        if let Some(build) = scope.build {
            filter.add(move |c: &&Change| build.changes.contains(&c.id));
        }
        // Personal changes are not part of a root's history.
        if let Some(root) = scope.root {
            filter.add(move |c: &&Change| !c.personal && c.vcs_root == root.id);
        }
        if let Some(project) = scope.project {
            filter.add(move |c: &&Change| catalog.change_project(c) == Some(project.id.as_str()));
        }

        if let Some(text) = locator.get_single_dimension_value(D::SinceChange.name())? {
            let since = self.get_item(&text)?.id;
            filter.add(move |c: &&Change| c.id > since);
        }

        if let Some(user) = locator.get_single_dimension_value(D::User.name())? {
            let user = user.to_lowercase();
            filter.add(move |c: &&Change| {
                c.user.as_ref().is_some_and(|u| u.to_lowercase() == user)
            });
        }

        let personal = locator.get_single_dimension_value_as_bool(D::Personal.name())?;
        if personal.is_some() {
            filter.add(move |c: &&Change| is_included_by_boolean_filter(personal, c.personal));
        }

        if let Some(conditions) =
            self.ctx
                .time
                .process_time_conditions(D::Date.name(), locator, change_date, None)?
        {
            // Change dates come from the VCS and need not follow id order, so
            // the limiting date cannot end the scan early.
            filter.add(conditions.filter.into_predicate());
        }

        Ok(filter)
    }

    fn get_all_items(&self) -> Result<ItemIter<'_, &'c Change>> {
        Ok(newest_first(self.ctx.catalog.changes.iter()))
    }

    /// Looks changes up in the narrowest scope: the build, the root, then the
    /// roots of the project.
    fn get_prefiltered_items(&self, locator: &mut Locator) -> Result<ItemIter<'_, &'c Change>> {
        let catalog = self.ctx.catalog;
        let scope = self.scope(locator)?;
        if let Some(build) = scope.build {
            return Ok(newest_first(build.changes.iter().filter_map(|id| catalog.change(*id))));
        }
        if let Some(root) = scope.root {
            return Ok(newest_first(
                catalog.changes.iter().filter(move |c| c.vcs_root == root.id),
            ));
        }
        if let Some(project) = scope.project {
            let roots: Vec<&str> = catalog.project_roots(&project.id).map(|r| r.id.as_str()).collect();
            tracing::debug!(project = %project.id, roots = roots.len(), "collecting project changes");
            return Ok(newest_first(
                catalog
                    .changes
                    .iter()
                    .filter(move |c| roots.contains(&c.vcs_root.as_str())),
            ));
        }
        self.get_all_items()
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
