// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `lok parse` command.

#![allow(clippy::unwrap_used)]

mod common;

use common::*;

#[test]
fn parse_prints_dimensions() {
    lok()
        .args(["parse", "buildType:bt,tag:a,tag:b"])
        .assert()
        .success()
        .stdout("buildType: bt\ntag: a\ntag: b\n");
}

#[test]
fn parse_expands_nested_locators() {
    lok()
        .args(["parse", "pool:(id:1),startDate:(date:2024-03-01T00:00:00Z,condition:before)"])
        .assert()
        .success()
        .stdout("pool:\n  id: 1\nstartDate:\n  date: 2024-03-01T00:00:00Z\n  condition: before\n");
}

#[test]
fn parse_single_value() {
    lok()
        .args(["parse", "42"])
        .assert()
        .success()
        .stdout("single value: 42\n");
}

#[test]
fn parse_needs_no_catalog() {
    let temp = TempDir::new().unwrap();
    lok()
        .args(["parse", "a:1"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn parse_reports_syntax_errors() {
    lok()
        .args(["parse", "a:(b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid locator 'a:(b'"));
}
