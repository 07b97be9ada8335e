//! Integration tests for the `plan` CLI.
//!
//! Each test points `TODO_PATH` at a file in a temp directory, runs `plan`
//! as a subprocess, and verifies stdout, stderr and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `plan` binary.
fn plan_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("plan");
    path
}

/// Run `plan` against the given todo file, returning (stdout, stderr, success).
fn run_plan(todo: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(plan_bin())
        .args(args)
        .env("TODO_PATH", todo)
        .env_remove("PLAN_LOG")
        .output()
        .expect("failed to run plan");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `plan` and return only its exit code.
fn plan_exit_code(todo: &Path, args: &[&str]) -> Option<i32> {
    Command::new(plan_bin())
        .args(args)
        .env("TODO_PATH", todo)
        .env_remove("PLAN_LOG")
        .output()
        .expect("failed to run plan")
        .status
        .code()
}

/// Run `plan` expecting success, return stdout.
fn run_plan_ok(todo: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_plan(todo, args);
    if !success {
        panic!(
            "plan {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `plan` expecting failure, return stderr.
fn run_plan_err(todo: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_plan(todo, args);
    if success {
        panic!("plan {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

/// Temp dir plus the todo file path inside it.
fn scratch() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::TempDir::new().unwrap();
    let todo = tmp.path().join("todo");
    (tmp, todo)
}

/// A small tree: work > {email bob, taxes}, home
fn seed(todo: &Path) {
    run_plan_ok(todo, &["create", "work"]);
    run_plan_ok(todo, &["create", "work", "email bob"]);
    run_plan_ok(todo, &["create", "work", "taxes"]);
    run_plan_ok(todo, &["create", "home"]);
}

fn read_doc(todo: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(todo).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let (_tmp, todo) = scratch();
    let out = run_plan_ok(&todo, &[]);
    assert_eq!(out.trim(), "nothing to show");
    // listing never writes
    assert!(!todo.exists());
}

#[test]
fn test_list_tree() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let out = run_plan_ok(&todo, &["list"]);
    assert_eq!(out, "work\n-- email bob\n-- taxes\nhome\n");
}

#[test]
fn test_list_subtree_fuzzy() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let out = run_plan_ok(&todo, &["list", "WO"]);
    assert_eq!(out, "work\n-- email bob\n-- taxes\n");
}

#[test]
fn test_list_json() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let out = run_plan_ok(&todo, &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["label"], "root");
    assert_eq!(parsed["children"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["children"][0]["children"][1]["label"], "taxes");
}

#[test]
fn test_list_no_match() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let err = run_plan_err(&todo, &["list", "garden"]);
    assert!(err.contains("error: no match for garden"));
    assert!(err.contains("available options are: work, home"));
}

#[test]
fn test_list_ambiguous() {
    let (_tmp, todo) = scratch();
    run_plan_ok(&todo, &["create", "hello1"]);
    run_plan_ok(&todo, &["create", "hello2"]);
    let err = run_plan_err(&todo, &["list", "hello"]);
    assert!(err.contains("ambiguous match for 'hello'"));
    assert!(err.contains("* hello1"));
    assert!(err.contains("* hello2"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_create_writes_document() {
    let (_tmp, todo) = scratch();
    let out = run_plan_ok(&todo, &["create", "  groceries  "]);
    assert_eq!(out.trim(), "groceries");
    assert_eq!(
        fs::read_to_string(&todo).unwrap(),
        r#"{"label":"root","finished":null,"children":[{"label":"groceries","finished":null,"children":[]}]}"#
    );
}

#[test]
fn test_create_shows_parent() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let out = run_plan_ok(&todo, &["create", "home", "fix sink"]);
    assert_eq!(out, "home\n-- fix sink\n");
}

#[test]
fn test_create_duplicate() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let before = fs::read_to_string(&todo).unwrap();
    let err = run_plan_err(&todo, &["create", "Home"]);
    assert!(err.contains("duplicate entry at level: Home"));
    assert_eq!(fs::read_to_string(&todo).unwrap(), before);
}

#[test]
fn test_create_requires_label() {
    let (_tmp, todo) = scratch();
    run_plan_err(&todo, &["create"]);
}

#[test]
fn test_finish_propagates() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    let out = run_plan_ok(&todo, &["finish", "work"]);
    assert!(out.starts_with("work (finished @ "));
    assert!(out.contains("-- email bob (finished @ "));

    let doc = read_doc(&todo);
    let work = &doc["children"][0];
    let stamp = work["finished"].as_i64().unwrap();
    assert!(stamp > 0);
    assert_eq!(work["children"][0]["finished"].as_i64(), Some(stamp));
    assert_eq!(work["children"][1]["finished"].as_i64(), Some(stamp));
    assert!(doc["children"][1]["finished"].is_null());
}

#[test]
fn test_finish_requires_path() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    run_plan_err(&todo, &["finish"]);
}

#[test]
fn test_usage_errors_exit_2() {
    let (_tmp, todo) = scratch();
    assert_eq!(plan_exit_code(&todo, &["finish"]), Some(2));
    assert_eq!(plan_exit_code(&todo, &["bogus"]), Some(2));
}

#[test]
fn test_runtime_errors_exit_1() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    assert_eq!(plan_exit_code(&todo, &["finish", "nope"]), Some(1));
    assert_eq!(plan_exit_code(&todo, &["create", "work"]), Some(1));
}

#[test]
fn test_unfinish() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    run_plan_ok(&todo, &["finish", "work"]);
    let out = run_plan_ok(&todo, &["unfinish", "work", "tax"]);
    assert_eq!(out, "taxes\n");

    let doc = read_doc(&todo);
    assert!(doc["children"][0]["children"][1]["finished"].is_null());
    assert!(doc["children"][0]["children"][0]["finished"].is_i64());
}

#[test]
fn test_cleanup_hides_finished() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    run_plan_ok(&todo, &["finish", "home"]);
    run_plan_ok(&todo, &["finish", "work", "email"]);
    run_plan_ok(&todo, &["cleanup"]);

    let out = run_plan_ok(&todo, &["list"]);
    assert_eq!(out, "work\n-- taxes\n");

    let doc = read_doc(&todo);
    assert_eq!(doc["children"][1]["label"], "home");
    assert_eq!(doc["children"][1]["hidden"], true);
    assert_eq!(doc["children"][0]["children"][0]["hidden"], true);
    assert!(doc["children"][0].get("hidden").is_none());
}

#[test]
fn test_cleanup_frees_label() {
    let (_tmp, todo) = scratch();
    seed(&todo);
    run_plan_ok(&todo, &["finish", "home"]);
    run_plan_ok(&todo, &["cleanup"]);
    run_plan_ok(&todo, &["create", "home"]);

    let doc = read_doc(&todo);
    assert_eq!(doc["children"].as_array().unwrap().len(), 3);
    let out = run_plan_ok(&todo, &["list", "home"]);
    assert_eq!(out, "home\n");
}

#[test]
fn test_file_flag_overrides_env() {
    let (tmp, todo) = scratch();
    let other = tmp.path().join("other.json");
    run_plan_ok(&todo, &["create", "--file", other.to_str().unwrap(), "elsewhere"]);
    assert!(other.exists());
    assert!(!todo.exists());
}

#[test]
fn test_malformed_document() {
    let (_tmp, todo) = scratch();
    fs::write(&todo, r#"{"label":"root","finished":"soon","children":[]}"#).unwrap();
    let err = run_plan_err(&todo, &["list"]);
    assert!(err.contains("is not a valid todo file"));
}
