// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `lok get` command.

#![allow(clippy::unwrap_used)]

mod common;

use common::*;
use yare::parameterized;

#[parameterized(
    build_by_id = { "build", "2", "2" },
    build_by_dimensions = { "build", "buildType:infra_deploy", "3" },
    agent_by_name = { "agent", "win-1", "3" },
    agent_by_id = { "agent", "2", "2" },
    change_by_user = { "change", "user:carol", "3" },
)]
fn get_prints_one_item(kind: &str, locator: &str, expected: &str) {
    let temp = init_temp();
    assert_eq!(run_ok(&temp, &["get", kind, locator, "-o", "ids"]), expected);
}

#[test]
fn get_text_row() {
    let temp = init_temp();
    lok()
        .args(["get", "agent", "linux-2"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("2  linux-2  pool=2  authorized,enabled\n");
}

#[test]
fn get_json_object() {
    let temp = init_temp();
    let out = run_ok(&temp, &["get", "change", "2", "-o", "json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["vcsRoot"], "r1");
    assert_eq!(value["user"], "bob");
}

#[test]
fn get_ambiguous_locator_fails() {
    let temp = init_temp();
    lok()
        .args(["get", "build", "buildType:web_build,defaultFilter:false"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("several items match"));
}

#[parameterized(
    unknown_id = { "build", "42" },
    unknown_name = { "agent", "mac-1" },
    empty_match = { "change", "user:nobody" },
)]
fn get_nothing_found(kind: &str, locator: &str) {
    let temp = init_temp();
    lok()
        .args(["get", kind, locator])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nothing is found by locator"));
}

#[test]
fn get_non_numeric_build_id_fails() {
    let temp = init_temp();
    lok()
        .args(["get", "build", "latest"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected a non-negative integer id"));
}

#[test]
fn get_hidden_build_is_denied() {
    let temp = init_temp();
    lok()
        .args(["get", "build", "5"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("access denied"));
}

#[test]
fn get_requires_locator() {
    lok().args(["get", "build"]).assert().failure();
}
