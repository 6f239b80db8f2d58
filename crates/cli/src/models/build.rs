// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Success,
    Failure,
    Unknown,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Failure => "failure",
            BuildStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(BuildStatus::Success),
            "failure" => Ok(BuildStatus::Failure),
            "unknown" => Ok(BuildStatus::Unknown),
            _ => Err("expected one of: success, failure, unknown".to_string()),
        }
    }
}

/// A build tag. Tags with an owner are private to that user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Tag {
    pub fn public(label: impl Into<String>) -> Self {
        Tag {
            label: label.into(),
            owner: None,
        }
    }

    pub fn private(label: impl Into<String>, owner: impl Into<String>) -> Self {
        Tag {
            label: label.into(),
            owner: Some(owner.into()),
        }
    }

    pub fn is_private(&self) -> bool {
        self.owner.is_some()
    }
}

/// A queued, running or finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: u64,
    /// Build number as shown to users; not necessarily numeric.
    pub number: String,
    pub build_type: String,
    /// Project id; viewing the build requires access to it.
    pub project: String,
    pub status: BuildStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub personal: bool,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Usually non-decreasing with `id`; finders only rely on that after
    /// checking it with [`Catalog::builds_queued_in_id_order`].
    ///
    /// [`Catalog::builds_queued_in_id_order`]: crate::Catalog::builds_queued_in_id_order
    pub queued: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<DateTime<Utc>>,
    /// Ids of the changes included in this build.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<u64>,
}

impl Build {
    pub fn queued_time(&self) -> Option<DateTime<Utc>> {
        Some(self.queued)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.started
    }

    pub fn finish_time(&self) -> Option<DateTime<Utc>> {
        self.finished
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
