// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory entity catalog and its lazily loaded file source.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use lk_core::CachingValue;

use crate::error::Result;
use crate::models::{Agent, AgentPool, Build, Change, Project, VcsRoot};

/// Every entity the finders can query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    pub projects: Vec<Project>,
    pub pools: Vec<AgentPool>,
    pub agents: Vec<Agent>,
    pub vcs_roots: Vec<VcsRoot>,
    pub builds: Vec<Build>,
    pub changes: Vec<Change>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn vcs_root(&self, id: &str) -> Option<&VcsRoot> {
        self.vcs_roots.iter().find(|r| r.id == id)
    }

    /// Roots attached to a project.
    pub fn project_roots<'c>(&'c self, project: &'c str) -> impl Iterator<Item = &'c VcsRoot> + 'c {
        self.vcs_roots.iter().filter(move |r| r.project == project)
    }

    pub fn build(&self, id: u64) -> Option<&Build> {
        self.builds.iter().find(|b| b.id == id)
    }

    /// True if a build with a larger id is never queued earlier than one
    /// with a smaller id.
    pub fn builds_queued_in_id_order(&self) -> bool {
        let mut builds: Vec<&Build> = self.builds.iter().collect();
        builds.sort_by_key(|b| b.id);
        builds.windows(2).all(|w| w[0].queued <= w[1].queued)
    }

    pub fn change(&self, id: u64) -> Option<&Change> {
        self.changes.iter().find(|c| c.id == id)
    }

    /// Project owning the change's root, if the root is known.
    pub fn change_project(&self, change: &Change) -> Option<&str> {
        self.vcs_root(&change.vcs_root).map(|r| r.project.as_str())
    }
}

/// A catalog file read on first use.
#[derive(Debug)]
pub struct CatalogSource {
    path: PathBuf,
    catalog: CachingValue<Catalog>,
}

impl CatalogSource {
    pub fn open(path: &Path) -> Self {
        let file = path.to_path_buf();
        let catalog = CachingValue::new(move || load(&file));
        CatalogSource {
            path: path.to_path_buf(),
            catalog,
        }
    }

    /// A source over an already built catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        CatalogSource {
            path: PathBuf::new(),
            catalog: CachingValue::simple(catalog),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The catalog, read and parsed on the first call.
    ///
    /// # Errors
    ///
    /// Returns an item source error if the file cannot be read or parsed.
    /// A failed read is retried on the next call.
    pub fn get(&self) -> Result<&Catalog> {
        Ok(self.catalog.get()?)
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_computed()
    }
}

fn load(path: &Path) -> lk_core::Result<Catalog> {
    let source_error =
        |reason: String| lk_core::Error::Source(format!("cannot read catalog '{}': {}", path.display(), reason));
    let text = fs::read_to_string(path).map_err(|e| source_error(e.to_string()))?;
    let catalog: Catalog = serde_json::from_str(&text).map_err(|e| source_error(e.to_string()))?;
    tracing::debug!(
        path = %path.display(),
        agents = catalog.agents.len(),
        builds = catalog.builds.len(),
        changes = catalog.changes.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
