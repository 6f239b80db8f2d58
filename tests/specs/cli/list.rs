// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `lok list` command.

#![allow(clippy::unwrap_used)]

mod common;

use common::*;
use yare::parameterized;

// =============================================================================
// Builds
// =============================================================================

#[parameterized(
    default_filter = { "", "3\n1" },
    default_filter_off = { "defaultFilter:false", "4\n3\n2\n1" },
    personal_failures = { "status:failure,personal:true", "2" },
    by_type = { "buildType:web_build,defaultFilter:false", "4\n2\n1" },
    pinned = { "pinned:true", "3" },
    queued_after = { "queuedDate:(date:2024-03-01T02:30:00Z)", "3" },
    finished_before = { "finishDate:(date:2024-03-01T02:00:00Z,condition:before)", "1" },
    tagged = { "tag:release", "1" },
    private_tag = { "tag:(private:true,owner:alice)", "3" },
    paged = { "defaultFilter:false,start:1,count:2", "3\n2" },
)]
fn list_builds(locator: &str, expected: &str) {
    let temp = init_temp();
    let mut args = vec!["list", "build", "-o", "ids"];
    if !locator.is_empty() {
        args.push(locator);
    }
    assert_eq!(run_ok(&temp, &args), expected);
}

#[test]
fn list_builds_text_shows_paging_footer() {
    let temp = init_temp();
    lok()
        .args(["list", "build", "count:1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3  #3  infra_deploy  success  -  pinned"))
        .stdout(predicate::str::contains("# start=0 count=1 processed=3"))
        .stdout(predicate::str::contains("# next page: start=1"));
}

#[test]
fn list_builds_reports_lookup_limit() {
    let temp = init_temp();
    lok()
        .args(["list", "build", "status:failure,lookupLimit:2"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# lookup limit reached"));
}

#[test]
fn list_builds_json() {
    let temp = init_temp();
    let out = run_ok(&temp, &["list", "build", "-o", "json", "branch:main"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["buildType"], "web_build");
    assert_eq!(value["items"][0]["tags"][0]["label"], "release");
    assert_eq!(value["nextStart"], serde_json::Value::Null);
}

#[test]
fn list_builds_never_shows_hidden_projects() {
    let temp = init_temp();
    assert_eq!(run_ok(&temp, &["list", "build", "-o", "ids", "number:1"]), "1");
}

// =============================================================================
// Agents and changes
// =============================================================================

#[parameterized(
    authorized_by_default = { "", "1\n2" },
    everything = { "defaultFilter:false", "1\n2\n3" },
    pool_by_name = { "pool:Linux,connected:true", "1" },
    pool_by_id = { "pool:(id:1),authorized:false", "3" },
)]
fn list_agents(locator: &str, expected: &str) {
    let temp = init_temp();
    let mut args = vec!["list", "agent", "-o", "ids"];
    if !locator.is_empty() {
        args.push(locator);
    }
    assert_eq!(run_ok(&temp, &args), expected);
}

#[parameterized(
    all = { "", "3\n2\n1" },
    of_root = { "vcsRoot:r1", "2\n1" },
    of_build = { "build:1", "2\n1" },
    of_project = { "project:infra", "3" },
    since_change = { "vcsRoot:r1,sinceChange:1", "2" },
    by_user = { "user:ALICE", "1" },
    dated_after = { "date:(date:2024-03-01T00:35:00Z)", "3\n2" },
)]
fn list_changes(locator: &str, expected: &str) {
    let temp = init_temp();
    let mut args = vec!["list", "change", "-o", "ids"];
    if !locator.is_empty() {
        args.push(locator);
    }
    assert_eq!(run_ok(&temp, &args), expected);
}

// =============================================================================
// Rejected queries
// =============================================================================

#[test]
fn list_unknown_dimension_fails_with_hint() {
    let temp = init_temp();
    lok()
        .args(["list", "build", "color:red"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported dimension 'color'"))
        .stderr(predicate::str::contains("buildType"));
}

#[test]
fn list_bad_boolean_fails() {
    let temp = init_temp();
    lok()
        .args(["list", "agent", "connected:maybe"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected 'true', 'false' or 'any'"));
}

#[test]
fn list_bad_time_names_dimension() {
    let temp = init_temp();
    lok()
        .args(["list", "build", "queuedDate:(date:yesterday)"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("queuedDate"));
}

#[test]
fn list_hidden_project_is_denied() {
    let temp = init_temp();
    lok()
        .args(["list", "build", "project:secret"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("access denied"));
}

#[test]
fn list_without_catalog_fails() {
    let temp = TempDir::new().unwrap();
    lok()
        .args(["list", "build"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no catalog configured"));
}

#[test]
fn list_uses_catalog_env() {
    let temp = init_temp();
    let other = TempDir::new().unwrap();
    lok()
        .args(["list", "agent", "-o", "ids"])
        .env("LOK_CATALOG", temp.path().join("catalog.json"))
        .current_dir(other.path())
        .assert()
        .success()
        .stdout("1\n2\n");
}
