// tests/cli.rs
//! Tests for the `interfaced` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CAN_HEAL: &str = "class_name CanHeal\nsignal healed\nfunc heal(amount):\n\tpass\n";

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_interfaced"))
        .args(["--color", "never"])
        .args(args)
        .arg("--root")
        .arg(root)
        .output()
        .expect("failed to run interfaced")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn check_passes_complete_project() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "can_heal.gd", CAN_HEAL);
    write(
        dir.path(),
        "items/potion.gd",
        "class_name Potion\nconst implements = [preload(\"res://can_heal.gd\")]\nsignal healed\nfunc heal(amount):\n\tpass\n",
    );

    let output = run(dir.path(), &["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("ok: 2 scripts scanned, 1 implementer checked against 1 interface"), "{out}");
}

#[test]
fn check_reports_missing_member() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "can_heal.gd", CAN_HEAL);
    write(
        dir.path(),
        "potion.gd",
        "class_name Potion\nconst implements = [preload(\"res://can_heal.gd\")]\nsignal healed\n",
    );

    let output = run(dir.path(), &["check"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("E1004"), "{err}");
    assert!(
        err.contains("Potion does not implement the method 'heal' on the interface CanHeal"),
        "{err}"
    );
    assert!(err.contains("check failed"), "{err}");
}

#[test]
fn check_only_scans_given_roots() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "can_heal.gd", CAN_HEAL);
    write(
        dir.path(),
        "broken/potion.gd",
        "const implements = [preload(\"res://can_heal.gd\")]\n",
    );
    write(dir.path(), "items/rock.gd", "class_name Rock\n");

    let output = run(dir.path(), &["check", "res://items"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 script scanned"));
}

#[test]
fn check_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "interfaced.toml", "validate = true\n");

    let output = run(dir.path(), &["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("E3002"), "{}", stderr(&output));
}

#[test]
fn inspect_shows_declarations_and_conformance() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "can_heal.gd", CAN_HEAL);
    write(
        dir.path(),
        "potion.gd",
        "class_name Potion\nconst implements = [preload(\"res://can_heal.gd\")]\nsignal healed\n@export var charges = 3\n",
    );

    let potion = dir.path().join("potion.gd");
    let output = run(dir.path(), &["inspect", potion.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("res://potion.gd"), "{out}");
    assert!(out.contains("name: Potion"), "{out}");
    assert!(out.contains("members: 1 event, 0 methods, 1 field"), "{out}");
    assert!(out.contains("CanHeal incomplete"), "{out}");
}

#[test]
fn inspect_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.gd", dir.path().display());

    let output = run(dir.path(), &["inspect", &pattern]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no .gd files found"));
}
