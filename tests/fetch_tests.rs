//! Integration tests for the get command

#![allow(deprecated)]

use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

mod common;
use common::{create_comment, gate_cmd, get_comments, init_store};

fn publish(root: &std::path::Path, doc: &Value) {
    gate_cmd()
        .current_dir(root)
        .args(["publish", doc["id"].as_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_get_empty_store() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());

    gate_cmd()
        .current_dir(temp.path())
        .arg("get")
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_get_outside_store_fails() {
    let temp = TempDir::new().unwrap();

    gate_cmd()
        .current_dir(temp.path())
        .arg("get")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("commentgate init"));
}

#[test]
fn test_get_filters_by_comment_period() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());

    for period in ["p1", "p2", "p3"] {
        let doc = create_comment(
            temp.path(),
            &format!(r#"{{"commentPeriodRef": "{}"}}"#, period),
        );
        publish(temp.path(), &doc);
    }

    let docs = get_comments(
        temp.path(),
        &[
            "--period",
            "p1",
            "--period",
            "p3",
            "--fields",
            "commentPeriodRef",
        ],
    );

    let mut periods: Vec<&str> = docs
        .iter()
        .map(|d| d["commentPeriodRef"].as_str().unwrap())
        .collect();
    periods.sort();
    assert_eq!(periods, vec!["p1", "p3"]);
}

#[test]
fn test_get_drops_unknown_fields() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), r#"{"name": "Jane", "comment": "hi"}"#);
    publish(temp.path(), &doc);

    let docs = get_comments(temp.path(), &["--fields", "name,hacked_field"]);

    assert_eq!(docs.len(), 1);
    let keys: Vec<&String> = docs[0].as_object().unwrap().keys().collect();
    let mut keys: Vec<&str> = keys.into_iter().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "name", "tags"]);
}

#[test]
fn test_get_uses_configured_default_fields() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), r#"{"name": "Jane", "comment": "hi"}"#);
    publish(temp.path(), &doc);

    gate_cmd()
        .current_dir(temp.path())
        .args(["config", "default_fields", "comment"])
        .assert()
        .success();

    let docs = get_comments(temp.path(), &[]);
    assert_eq!(docs[0]["comment"], "hi");
    assert!(docs[0].get("name").is_none());
}

#[test]
fn test_get_unauthorized_id_matches_missing_id() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), "{}");

    let hidden = get_comments(temp.path(), &[doc["id"].as_str().unwrap()]);
    let missing = get_comments(temp.path(), &["0123456789abcdef0123456789abcdef"]);

    assert_eq!(hidden, missing);
    assert!(hidden.is_empty());
}

#[test]
fn test_get_requires_all_roles_of_a_tag_set() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), r#"{"name": "Jane"}"#);
    let id = doc["id"].as_str().unwrap();

    // Hand-edit the stored document to require two roles at once.
    let path = temp.path().join("comments").join(format!("{}.json", id));
    let mut stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    stored["tags"] = json!([["reviewer", "staff"]]);
    fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

    assert!(get_comments(temp.path(), &["--roles", "reviewer"]).is_empty());
    let docs = get_comments(temp.path(), &["--roles", "reviewer,staff"]);
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_get_treats_empty_stored_tags_as_hidden() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), "{}");
    let id = doc["id"].as_str().unwrap();

    let path = temp.path().join("comments").join(format!("{}.json", id));
    let mut stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    stored["tags"] = json!([[]]);
    fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

    assert!(get_comments(temp.path(), &["--roles", "sysadmin,public"]).is_empty());
}

#[test]
fn test_get_rejects_malformed_id() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());

    gate_cmd()
        .current_dir(temp.path())
        .args(["get", "not-an-id"])
        .assert()
        .code(3);
}

#[test]
fn test_get_survives_malformed_stored_tags() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let good = create_comment(temp.path(), r#"{"name": "Jane"}"#);
    publish(temp.path(), &good);

    for raw_tags in [json!(null), json!(["public"]), json!("public")] {
        let bad = create_comment(temp.path(), r#"{"name": "Bad"}"#);
        let id = bad["id"].as_str().unwrap();
        let path = temp.path().join("comments").join(format!("{}.json", id));
        let mut stored: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        stored["tags"] = raw_tags;
        fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();
    }

    let docs = get_comments(temp.path(), &["--fields", "name"]);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], good["id"]);

    let admin = get_comments(temp.path(), &["--roles", "sysadmin", "--fields", "name"]);
    assert_eq!(admin.len(), 1);
}

#[test]
fn test_get_hides_sub_object_with_malformed_tags() {
    let temp = TempDir::new().unwrap();
    init_store(temp.path());
    let doc = create_comment(temp.path(), r#"{"commentAuthor": {"contactName": "Jane"}}"#);
    publish(temp.path(), &doc);
    let id = doc["id"].as_str().unwrap();

    let path = temp.path().join("comments").join(format!("{}.json", id));
    let mut stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    stored["commentAuthor"]["tags"] = json!(null);
    fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

    let docs = get_comments(temp.path(), &["--roles", "sysadmin", "--fields", "commentAuthor"]);
    assert_eq!(docs.len(), 1);
    assert!(docs[0].get("commentAuthor").is_none());
}
