// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Permission checks consulted by finders before returning scoped items.

use crate::error::{Error, Result};

/// Decides whether the caller holds a permission within a scope.
pub trait PermissionChecker: Send + Sync {
    /// Returns true if `permission` is granted for `scope`.
    fn is_permitted(&self, permission: &str, scope: &str) -> bool;

    /// Fails with [`Error::AccessDenied`] unless the permission is granted.
    fn check_permission(&self, permission: &str, scope: &str) -> Result<()> {
        if self.is_permitted(permission, scope) {
            Ok(())
        } else {
            Err(Error::AccessDenied {
                permission: permission.to_string(),
                scope: scope.to_string(),
            })
        }
    }
}

/// Grants everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    fn is_permitted(&self, _permission: &str, _scope: &str) -> bool {
        true
    }
}
