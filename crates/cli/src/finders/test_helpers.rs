// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture catalog for finder tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lk_core::{FinderOptions, FixedClock, TimeCondition};

use super::FinderContext;
use crate::catalog::Catalog;
use crate::config::PermissionsConfig;
use crate::models::{Agent, AgentPool, Build, BuildStatus, Change, Project, Tag, VcsRoot};
use crate::permissions::ConfigPermissions;

/// Midnight of the fixture's first day.
pub fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Fixture time `hours:minutes` after [`base`].
pub fn at(hours: i64, minutes: i64) -> DateTime<Utc> {
    base() + Duration::hours(hours) + Duration::minutes(minutes)
}

/// Owns everything a [`FinderContext`] borrows.
pub struct Fixture {
    pub catalog: Catalog,
    pub permissions: ConfigPermissions,
    pub time: TimeCondition,
    pub options: FinderOptions,
}

impl Fixture {
    /// The standard catalog, with project `secret` hidden and "now" one day
    /// after [`base`].
    pub fn new() -> Self {
        Fixture {
            catalog: catalog(),
            permissions: ConfigPermissions::new(&PermissionsConfig {
                hidden_projects: vec!["secret".to_string()],
            }),
            time: TimeCondition::new(Arc::new(FixedClock(at(24, 0)))),
            options: FinderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FinderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ctx(&self) -> FinderContext<'_> {
        FinderContext {
            catalog: &self.catalog,
            permissions: &self.permissions,
            time: &self.time,
            options: &self.options,
        }
    }
}

fn agent(id: u64, name: &str, pool: u64, connected: bool, authorized: bool, enabled: bool) -> Agent {
    Agent {
        id,
        name: name.to_string(),
        pool,
        connected,
        authorized,
        enabled,
    }
}

/// Build `id` queued at hour `id`, started five minutes later, finished at half past.
fn build(id: u64, number: &str, build_type: &str, project: &str, status: BuildStatus) -> Build {
    let hour = id as i64;
    Build {
        id,
        number: number.to_string(),
        build_type: build_type.to_string(),
        project: project.to_string(),
        status,
        branch: Some("main".to_string()),
        personal: false,
        canceled: false,
        running: false,
        pinned: false,
        tags: Vec::new(),
        queued: at(hour, 0),
        started: Some(at(hour, 5)),
        finished: Some(at(hour, 30)),
        changes: Vec::new(),
    }
}

/// Change `id` dated at hour `id`.
fn change(id: u64, root: &str, version: &str, user: &str) -> Change {
    Change {
        id,
        vcs_root: root.to_string(),
        version: version.to_string(),
        user: Some(user.to_string()),
        personal: false,
        date: at(id as i64, 0),
        comment: format!("change {id}"),
    }
}

/// The fixture catalog: three projects (`secret` meant to be hidden), two pools,
/// four agents, four roots, seven builds and seven changes.
pub fn catalog() -> Catalog {
    let project = |id: &str, name: &str| Project {
        id: id.to_string(),
        name: name.to_string(),
    };
    let root = |id: &str, project: &str| VcsRoot {
        id: id.to_string(),
        name: format!("{id} root"),
        project: project.to_string(),
    };

    let mut b1 = build(1, "1", "web_build", "web", BuildStatus::Success);
    b1.tags = vec![Tag::private("mine", "alice"), Tag::public("release")];
    b1.changes = vec![1, 2];

    let mut b2 = build(2, "2", "web_build", "web", BuildStatus::Failure);
    b2.personal = true;

    let mut b3 = build(3, "3", "web_build", "web", BuildStatus::Success);
    b3.branch = Some("feature".to_string());
    b3.canceled = true;

    let mut b4 = build(4, "4", "infra_deploy", "infra", BuildStatus::Success);
    b4.pinned = true;
    b4.branch = None;
    b4.tags = vec![Tag::public("Deploy")];

    let mut b5 = build(5, "5", "web_build", "web", BuildStatus::Unknown);
    b5.running = true;
    b5.finished = None;

    let b6 = build(6, "1", "secret_build", "secret", BuildStatus::Success);

    let mut b7 = build(7, "6", "web_build", "web", BuildStatus::Success);
    b7.tags = vec![
        Tag::private("zeta", "Bob"),
        Tag::public("release"),
        Tag::private("mine", "alice"),
        Tag::public("Beta"),
    ];
    b7.changes = vec![3];

    let mut c5 = change(5, "r1", "a3", "alice");
    c5.personal = true;

    Catalog {
        projects: vec![
            project("web", "Web"),
            project("infra", "Infrastructure"),
            project("secret", "Secret"),
        ],
        pools: vec![
            AgentPool {
                id: 1,
                name: "Default".to_string(),
            },
            AgentPool {
                id: 2,
                name: "Linux".to_string(),
            },
        ],
        // Stored out of id order on purpose.
        agents: vec![
            agent(3, "linux-2", 2, true, true, true),
            agent(1, "win-1", 1, true, true, false),
            agent(2, "linux-1", 2, false, true, true),
            agent(4, "new-agent", 1, true, false, true),
        ],
        vcs_roots: vec![
            root("r1", "web"),
            root("r2", "web"),
            root("r3", "infra"),
            root("r4", "secret"),
        ],
        builds: vec![b1, b2, b3, b4, b5, b6, b7],
        changes: vec![
            change(1, "r1", "a1", "alice"),
            change(2, "r2", "b1", "bob"),
            change(3, "r1", "a2", "alice"),
            change(4, "r3", "c1", "carol"),
            c5,
            change(6, "r4", "s1", "dave"),
            change(7, "r2", "b2", "Bob"),
        ],
    }
}
