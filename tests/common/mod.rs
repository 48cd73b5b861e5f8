#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;

pub fn gate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("commentgate").unwrap();
    cmd.env_remove("COMMENTGATE_ROOT");
    cmd.env_remove("COMMENTGATE_LOG");
    cmd
}

/// Initialize a store at `root`
pub fn init_store(root: &Path) {
    gate_cmd().arg("init").arg(root).assert().success();
}

/// Create a comment from a JSON payload on stdin and return the stored document
pub fn create_comment(root: &Path, payload: &str) -> Value {
    let output = gate_cmd()
        .current_dir(root)
        .arg("create")
        .write_stdin(payload)
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Run `get` with the given arguments and parse the JSON array it prints
pub fn get_comments(root: &Path, args: &[&str]) -> Vec<Value> {
    let output = gate_cmd()
        .current_dir(root)
        .arg("get")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "get failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}
