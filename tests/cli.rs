//! Binary integration tests: exit codes, stderr diagnostics and the
//! `--model` / `--target` flags.

use std::path::Path;
use std::process::{Command, Output};

fn intentc(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("config.yaml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    Command::new(env!("CARGO_BIN_EXE_intentc"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run intentc")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn parse_error_exits_two_with_banner() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bad.intent", "block icmp\nallow from A to B\n");

    let out = intentc(dir.path(), &[&file]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("=== Parse Error ==="), "{stderr}");
    assert!(stderr.contains("[2:7] syntax error"), "{stderr}");
    assert!(stderr.contains("allow from A to B\n      ^"), "{stderr}");
}

#[test]
fn sample_program_with_all_targets() {
    let dir = tempfile::tempdir().unwrap();
    let out = intentc(dir.path(), &["--target", "all"]);
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("No.\tIntentLang\tJSON Semantic Model\tP4/OpenFlow\tCisco Config\tLinux Config")
    );
    assert_eq!(lines.count(), 10);
}

#[test]
fn single_target_column() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "one.intent", "delete vlan 10\n");
    let out = intentc(dir.path(), &["--target", "router-cli", &file]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.ends_with("\tno vlan 10\n"), "{stdout}");
}

#[test]
fn model_input_skips_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(
        dir.path(),
        "model.jsonl",
        "{\"type\":\"backup\",\"action\":\"now\"}\n\n{\"type\":\"vlan\",\"id\":10,\"action\":\"delete\"}\n",
    );
    let out = intentc(dir.path(), &["--model", "--format", "json", &file]);
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["targets"]["host-net"], "ip link delete eth0.10");
}

#[test]
fn invalid_model_line_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(
        dir.path(),
        "model.jsonl",
        "{\"type\":\"backup\",\"action\":\"now\"}\n{\"type\":\"firewall\"}\n",
    );
    let out = intentc(dir.path(), &["--model", &file]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: invalid semantic model on line 2"), "{stderr}");
}

#[test]
fn unknown_target_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = intentc(dir.path(), &["--target", "switch"]);
    assert_eq!(out.status.code(), Some(64));
}
