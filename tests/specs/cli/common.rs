// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: helpers are shared across the test files, and not
// every file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Three projects (`secret` hidden by lok.toml), two pools, three agents,
/// two roots, five builds and three changes. Build n is queued at hour n
/// on 2024-03-01.
pub const CATALOG: &str = r#"{
  "projects": [
    {"id": "web", "name": "Web"},
    {"id": "infra", "name": "Infrastructure"},
    {"id": "secret", "name": "Secret"}
  ],
  "pools": [
    {"id": 1, "name": "Default"},
    {"id": 2, "name": "Linux"}
  ],
  "agents": [
    {"id": 1, "name": "linux-1", "pool": 2, "connected": true, "authorized": true},
    {"id": 2, "name": "linux-2", "pool": 2, "connected": false, "authorized": true},
    {"id": 3, "name": "win-1", "pool": 1, "connected": true, "authorized": false}
  ],
  "vcsRoots": [
    {"id": "r1", "name": "web repo", "project": "web"},
    {"id": "r2", "name": "infra repo", "project": "infra"}
  ],
  "builds": [
    {"id": 1, "number": "1", "buildType": "web_build", "project": "web", "status": "success",
     "branch": "main", "tags": [{"label": "release"}], "changes": [1, 2],
     "queued": "2024-03-01T01:00:00Z", "started": "2024-03-01T01:05:00Z",
     "finished": "2024-03-01T01:30:00Z"},
    {"id": 2, "number": "2", "buildType": "web_build", "project": "web", "status": "failure",
     "branch": "main", "personal": true,
     "queued": "2024-03-01T02:00:00Z", "started": "2024-03-01T02:05:00Z",
     "finished": "2024-03-01T02:30:00Z"},
    {"id": 3, "number": "3", "buildType": "infra_deploy", "project": "infra", "status": "success",
     "pinned": true,
     "tags": [{"label": "prod"}, {"label": "mine", "owner": "alice"}],
     "queued": "2024-03-01T03:00:00Z", "started": "2024-03-01T03:05:00Z",
     "finished": "2024-03-01T03:30:00Z"},
    {"id": 4, "number": "4", "buildType": "web_build", "project": "web", "status": "unknown",
     "branch": "main", "running": true,
     "queued": "2024-03-01T04:00:00Z", "started": "2024-03-01T04:05:00Z"},
    {"id": 5, "number": "1", "buildType": "secret_build", "project": "secret", "status": "success",
     "queued": "2024-03-01T05:00:00Z", "started": "2024-03-01T05:05:00Z",
     "finished": "2024-03-01T05:30:00Z"}
  ],
  "changes": [
    {"id": 1, "vcsRoot": "r1", "version": "a1", "user": "alice",
     "date": "2024-03-01T00:30:00Z", "comment": "first"},
    {"id": 2, "vcsRoot": "r1", "version": "a2", "user": "bob",
     "date": "2024-03-01T00:40:00Z", "comment": "second"},
    {"id": 3, "vcsRoot": "r2", "version": "b1", "user": "carol",
     "date": "2024-03-01T02:10:00Z", "comment": "third"}
  ]
}"#;

pub fn lok() -> Command {
    let mut cmd = cargo_bin_cmd!("lok");
    cmd.env_remove("LOK_CATALOG").env_remove("LOK_LOG");
    cmd
}

/// A directory holding `catalog.json` and a `lok.toml` that points at it and
/// hides project `secret`.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("catalog.json"), CATALOG).unwrap();
    std::fs::write(
        temp.path().join("lok.toml"),
        "catalog = \"catalog.json\"\n\n[permissions]\nhidden_projects = [\"secret\"]\n",
    )
    .unwrap();
    temp
}

/// Runs `lok <args>` in `temp` and returns trimmed stdout, asserting success.
pub fn run_ok(temp: &TempDir, args: &[&str]) -> String {
    let output = lok().args(args).current_dir(temp.path()).output().unwrap();
    assert!(
        output.status.success(),
        "lok {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
