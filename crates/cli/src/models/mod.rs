// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog entities queried by the finders.
//!
//! Field names follow the catalog's JSON keys (camelCase).

mod agent;
mod build;
mod change;
mod project;

pub use agent::{Agent, AgentPool};
pub use build::{Build, BuildStatus, Tag};
pub use change::Change;
pub use project::{Project, VcsRoot};
