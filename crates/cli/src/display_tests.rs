// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::{TimeZone, Utc};
use crate::models::BuildStatus;

fn build(id: u64) -> Build {
    Build {
        id,
        number: format!("{}", id + 100),
        build_type: "web_build".to_string(),
        project: "web".to_string(),
        status: BuildStatus::Success,
        branch: None,
        personal: false,
        canceled: false,
        running: true,
        pinned: true,
        tags: Vec::new(),
        queued: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        started: None,
        finished: None,
        changes: Vec::new(),
    }
}

fn page<'a>(items: Vec<&'a Build>, count: Option<u64>, limit_reached: bool) -> PagedSearchResult<&'a Build> {
    PagedSearchResult {
        items,
        start: 0,
        count,
        processed: 5,
        lookup_limit_reached: limit_reached,
    }
}

#[test]
fn test_build_columns() {
    let line = format_item(&build(7), OutputFormat::Text).unwrap();
    assert_eq!(line, "7  #107  web_build  success  -  running,pinned  2024-03-01 09:30:00");
}

#[test]
fn test_tag_columns() {
    assert_eq!(
        format_item(&Tag::private("mine", "alice"), OutputFormat::Text).unwrap(),
        "mine  private:alice"
    );
    assert_eq!(format_item(&Tag::public("release"), OutputFormat::Ids).unwrap(), "release");
}

#[test]
fn test_text_page_footer() {
    let (a, b) = (build(2), build(1));
    let out = format_page(&page(vec![&a, &b], Some(10), false), OutputFormat::Text).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2  #102"));
    assert_eq!(lines[2], "# start=0 count=2 processed=5");
}

#[test]
fn test_text_page_full_and_limited() {
    let a = build(2);
    let out = format_page(&page(vec![&a], Some(1), true), OutputFormat::Text).unwrap();
    assert!(out.contains("# next page: start=1"));
    assert!(out.contains("# lookup limit reached"));
}

#[test]
fn test_ids_page() {
    let (a, b) = (build(2), build(1));
    let out = format_page(&page(vec![&a, &b], None, false), OutputFormat::Ids).unwrap();
    assert_eq!(out, "2\n1");
}

#[test]
fn test_json_page() {
    let a = build(3);
    let out = format_page(&page(vec![&a], Some(1), false), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["items"][0]["id"], 3);
    assert_eq!(value["items"][0]["buildType"], "web_build");
    assert_eq!(value["count"], 1);
    assert_eq!(value["processed"], 5);
    assert_eq!(value["lookupLimitReached"], false);
    assert_eq!(value["nextStart"], 1);
}

#[test]
fn test_empty_json_page_has_null_next_start() {
    let out = format_page::<Build>(&page(vec![], Some(10), false), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(value["items"].as_array().unwrap().is_empty());
    assert!(value["nextStart"].is_null());
}
