//! End-to-end tests for the `verdict` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const DISCOUNT: &str = r#"
(ruleset int64
  (rule (eq (param "product-id" "string") "a") 10)
  (rule (eq (param "product-id" "string") "b") 20))
"#;

fn verdict() -> Command {
    Command::cargo_bin("verdict").unwrap()
}

fn write_ruleset(dir: &Path, file: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, content).unwrap();
    path
}

fn load(store: &Path, file: &Path) -> assert_cmd::assert::Assert {
    verdict()
        .args(["load", "--namespace", "shop", "--name", "discount"])
        .arg("--addr")
        .arg(store)
        .arg("--file")
        .arg(file)
        .assert()
}

// ============================================================================
// load
// ============================================================================

#[test]
fn test_load_prints_key_and_version() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    let file = write_ruleset(dir.path(), "discount.sexpr", DISCOUNT);

    load(&store, &file)
        .success()
        .stdout(predicate::str::contains("shop/discount version 1"));
    load(&store, &file)
        .success()
        .stdout(predicate::str::contains("shop/discount version 2"));
    assert!(store.join("shop/discount/.versions/2.json").is_file());
}

#[test]
fn test_load_rejects_ill_typed_ruleset() {
    let dir = TempDir::new().unwrap();
    let file = write_ruleset(
        dir.path(),
        "bad.sexpr",
        r#"(ruleset int64 (rule (eq (param "x" "string") 1) 10))"#,
    );

    load(&dir.path().join("store"), &file)
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_load_rejects_signature_change() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    load(&store, &write_ruleset(dir.path(), "v1.sexpr", DISCOUNT)).success();

    let changed = write_ruleset(
        dir.path(),
        "v2.sexpr",
        r#"(ruleset string (rule #t "x"))"#,
    );
    load(&store, &changed).failure();
}

// ============================================================================
// eval
// ============================================================================

#[test]
fn test_eval_text_output() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    load(&store, &write_ruleset(dir.path(), "d.sexpr", DISCOUNT)).success();

    verdict()
        .args(["eval", "--key", "shop/discount", "--param", "product-id=string:b"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("20\t(rule 1, version 1)"));
}

#[test]
fn test_eval_json_output() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    load(&store, &write_ruleset(dir.path(), "d.sexpr", DISCOUNT)).success();

    let output = verdict()
        .args(["--output", "json", "eval", "--key", "shop/discount"])
        .args(["--param", "product-id=string:a"])
        .arg("--addr")
        .arg(&store)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["value"], "10");
    assert_eq!(json["type"], "int64");
    assert_eq!(json["matched_rule"], 0);
}

#[test]
fn test_eval_failures_exit_non_zero() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    load(&store, &write_ruleset(dir.path(), "d.sexpr", DISCOUNT)).success();

    // no rule matches
    verdict()
        .args(["eval", "--key", "shop/discount", "--param", "product-id=string:z"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rule matched"));

    // missing key
    verdict()
        .args(["eval", "--key", "shop/missing"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .failure();

    // malformed parameter
    verdict()
        .args(["eval", "--key", "shop/discount", "--param", "product-id"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .failure();
}

#[test]
fn test_eval_missing_store_is_not_created() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("typo");

    verdict()
        .args(["eval", "--key", "shop/discount"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .failure();
    assert!(!store.exists());
}

// ============================================================================
// show / list
// ============================================================================

#[test]
fn test_show_and_list() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    load(&store, &write_ruleset(dir.path(), "d.sexpr", DISCOUNT)).success();

    verdict()
        .args(["show", "--key", "shop/discount"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("(ruleset int64"));

    verdict()
        .args(["list"])
        .arg("--addr")
        .arg(&store)
        .assert()
        .success()
        .stdout("shop/discount\n");
}
