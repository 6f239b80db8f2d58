// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::{
    is_included_by_boolean_filter, Dimension, Error, Finder, FinderOptions, ItemIter, Locator,
    MultiCheckerFilter, Result,
};

use super::{check_nested, single_id, FinderContext};
use crate::models::{Agent, AgentPool};
use AgentDimension as D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentDimension {
    Id,
    Name,
    Connected,
    Authorized,
    Enabled,
    Pool,
    DefaultFilter,
}

impl Dimension for AgentDimension {
    fn name(self) -> &'static str {
        match self {
            AgentDimension::Id => "id",
            AgentDimension::Name => "name",
            AgentDimension::Connected => "connected",
            AgentDimension::Authorized => "authorized",
            AgentDimension::Enabled => "enabled",
            AgentDimension::Pool => "pool",
            AgentDimension::DefaultFilter => "defaultFilter",
        }
    }

    fn all() -> &'static [Self] {
        &[
            AgentDimension::Id,
            AgentDimension::Name,
            AgentDimension::Connected,
            AgentDimension::Authorized,
            AgentDimension::Enabled,
            AgentDimension::Pool,
            AgentDimension::DefaultFilter,
        ]
    }
}

/// Finds build agents, ordered by id.
///
/// Unless `defaultFilter:false` is given, unauthorized agents are skipped
/// when the locator does not mention `authorized`.
pub struct AgentFinder<'c> {
    ctx: FinderContext<'c>,
}

impl<'c> AgentFinder<'c> {
    pub fn new(ctx: FinderContext<'c>) -> Self {
        AgentFinder { ctx }
    }

    /// Resolves a pool locator: a bare name or id, or `id:` / `name:`.
    fn find_pool(&self, mut locator: Locator) -> Result<&'c AgentPool> {
        let pools = &self.ctx.catalog.pools;
        let found = if let Some(value) = locator.get_single_value() {
            pools
                .iter()
                .find(|p| p.name == value)
                .or_else(|| {
                    let id = value.trim().parse::<u64>().ok()?;
                    pools.iter().find(|p| p.id == id)
                })
        } else {
            let id = single_id(&mut locator, "id")?;
            let name = locator.get_single_dimension_value("name")?;
            if id.is_none() && name.is_none() {
                return Err(Error::bad_value(
                    D::Pool.name(),
                    &locator.to_string(),
                    "expected a pool name, 'id' or 'name'",
                ));
            }
            pools.iter().find(|p| {
                id.is_none_or(|id| p.id == id) && name.as_ref().is_none_or(|n| &p.name == n)
            })
        };
        check_nested(D::Pool.name(), &locator)?;
        found.ok_or_else(|| Error::NotFound(locator.to_string()))
    }
}

impl<'c> Finder for AgentFinder<'c> {
    type Item = &'c Agent;
    type Dimension = AgentDimension;

    const KIND: &'static str = "agent";

    fn options(&self) -> &FinderOptions {
        self.ctx.options
    }

    fn find_single_item(&self, locator: &mut Locator) -> Result<Option<&'c Agent>> {
        let Some(value) = locator.get_single_value() else {
            return Ok(None);
        };
        let agents = &self.ctx.catalog.agents;
        let found = agents.iter().find(|a| a.name == value).or_else(|| {
            let id = value.trim().parse::<u64>().ok()?;
            agents.iter().find(|a| a.id == id)
        });
        found.map(Some).ok_or(Error::NotFound(value))
    }

    fn get_filter<'a>(&'a self, locator: &mut Locator) -> Result<MultiCheckerFilter<'a, &'c Agent>> {
        let mut filter = self.paged_filter(locator)?;

        if let Some(id) = single_id(locator, D::Id.name())? {
            filter.add(move |a: &&Agent| a.id == id);
        }

        if let Some(name) = locator.get_single_dimension_value(D::Name.name())? {
            filter.add(move |a: &&Agent| a.name == name);
        }

        let connected = locator.get_single_dimension_value_as_bool(D::Connected.name())?;
        if connected.is_some() {
            filter.add(move |a: &&Agent| is_included_by_boolean_filter(connected, a.connected));
        }

        let default_filter =
            locator.get_single_dimension_value_as_bool_or(D::DefaultFilter.name(), Some(true))?;
        let mut authorized = locator.get_single_dimension_value_as_bool(D::Authorized.name())?;
        if authorized.is_none() && !locator.has_dimension(D::Authorized.name()) && default_filter == Some(true) {
            authorized = Some(true);
        }
        if authorized.is_some() {
            filter.add(move |a: &&Agent| is_included_by_boolean_filter(authorized, a.authorized));
        }

        let enabled = locator.get_single_dimension_value_as_bool(D::Enabled.name())?;
        if enabled.is_some() {
            filter.add(move |a: &&Agent| is_included_by_boolean_filter(enabled, a.enabled));
        }

        if let Some(pool) = locator.get_nested(D::Pool.name())? {
            let pool_id = self.find_pool(pool)?.id;
            filter.add(move |a: &&Agent| a.pool == pool_id);
        }

        Ok(filter)
    }

    fn get_all_items(&self) -> Result<ItemIter<'_, &'c Agent>> {
        let mut agents: Vec<&'c Agent> = self.ctx.catalog.agents.iter().collect();
        agents.sort_by_key(|a| a.id);
        Ok(Box::new(agents.into_iter()))
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
