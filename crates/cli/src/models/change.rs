// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A change detected in a VCS root.
///
/// Ids grow with detection order, so a larger id is a newer change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub id: u64,
    pub vcs_root: String,
    /// Revision as reported by the VCS.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Personal (pre-tested) changes are not part of the root history.
    #[serde(default)]
    pub personal: bool,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub comment: String,
}
