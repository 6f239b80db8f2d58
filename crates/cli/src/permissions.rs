// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use lk_core::PermissionChecker;

use crate::config::PermissionsConfig;

/// Permission to see a project and everything scoped to it.
pub const VIEW_PROJECT: &str = "view_project";

/// Grants everything except viewing the configured hidden projects.
#[derive(Debug, Clone, Default)]
pub struct ConfigPermissions {
    hidden_projects: Vec<String>,
}

impl ConfigPermissions {
    pub fn new(config: &PermissionsConfig) -> Self {
        ConfigPermissions {
            hidden_projects: config.hidden_projects.clone(),
        }
    }
}

impl PermissionChecker for ConfigPermissions {
    fn is_permitted(&self, permission: &str, scope: &str) -> bool {
        permission != VIEW_PROJECT || !self.hidden_projects.iter().any(|p| p == scope)
    }
}

#[cfg(test)]
#[path = "permissions_tests.rs"]
mod tests;
