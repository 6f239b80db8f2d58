// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `lok tags` command.

#![allow(clippy::unwrap_used)]

mod common;

use common::*;
use yare::parameterized;

#[parameterized(
    public_only_by_default = { "3", None, "prod" },
    private = { "3", Some("private:true"), "mine" },
    any = { "3", Some("private:any"), "prod\nmine" },
    build_by_locator = { "tag:release", None, "release" },
    no_tags = { "2", None, "" },
)]
fn tags_of_build(build: &str, locator: Option<&str>, expected: &str) {
    let temp = init_temp();
    let mut args = vec!["tags", build, "-o", "ids"];
    if let Some(locator) = locator {
        args.push(locator);
    }
    assert_eq!(run_ok(&temp, &args), expected);
}

#[test]
fn tags_text_shows_owner() {
    let temp = init_temp();
    lok()
        .args(["tags", "3", "private:true"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mine  private:alice\n"));
}

#[test]
fn tags_reject_unknown_dimension() {
    let temp = init_temp();
    lok()
        .args(["tags", "3", "color:red"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported dimension 'color'"));
}

#[test]
fn tags_of_missing_build_fail() {
    let temp = init_temp();
    lok()
        .args(["tags", "42"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nothing is found by locator '42'"));
}
