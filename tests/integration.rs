//! Integration tests for poplr


use assert_cmd::Command;
use harness::{TestRepo, poplr_command, run_poplr};
use std::path::Path;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn poplr_in(repo: &TestRepo, cwd: &Path, args: &[&str]) -> (String, String, bool) {
    let output = poplr_command(repo)
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to run poplr");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn sample_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.add_file("src/main.rs", "fn main() {}");
    repo.add_file("src/lib.rs", "pub mod foo;");
    repo.add_file("README.md", "# readme");
    repo.add_file("Cargo.toml", "[package]");
    repo
}

#[test]
fn test_basic_tree_output() {
    let repo = sample_repo();

    let (stdout, stderr, success) = run_poplr(&repo, &["tree", "--color", "never"]);
    assert!(success, "poplr should succeed: {}", stderr);
    assert_eq!(
        stdout,
        "├── src/\n│   ├── lib.rs\n│   └── main.rs\n├── Cargo.toml\n└── README.md\n\n"
    );
}

#[test]
fn test_no_subcommand_runs_tree() {
    let repo = sample_repo();
    let (with_cmd, _, _) = run_poplr(&repo, &["tree"]);
    let (without_cmd, _, success) = run_poplr(&repo, &[]);
    assert!(success);
    assert_eq!(with_cmd, without_cmd);
}

#[test]
fn test_explicit_path_argument() {
    let repo = TestRepo::new();
    repo.add_file("inner/only.txt", "x");
    repo.add_file("outside.txt", "x");

    let (stdout, _, success) = run_poplr(&repo, &["tree", "inner"]);
    assert!(success);
    assert_eq!(stdout, "└── only.txt\n\n");
}

#[test]
fn test_dot_segment_roots_are_resolved() {
    let repo = TestRepo::new();
    repo.add_file("project/sub/a.txt", "x");
    let project = repo.path().join("project");
    let sub = project.join("sub");

    let (stdout, stderr, success) = poplr_in(&repo, &sub, &["tree", "..", "-r", "-d", "0"]);
    assert!(success, "{}", stderr);
    assert_eq!(stdout, "project/\n└── sub/\n\n");

    let (stdout, _, success) = poplr_in(&repo, &project, &["tree", ".", "-p", "-d", "0"]);
    assert!(success);
    assert_eq!(stdout, format!("└── {}/\n\n", sub.display()));
}

#[test]
fn test_max_depth_zero_lists_top_level() {
    let repo = sample_repo();

    let (stdout, _, success) = run_poplr(&repo, &["tree", "-d", "0"]);
    assert!(success);
    assert!(stdout.contains("├── src/"));
    assert!(!stdout.contains("main.rs"), "depth 0 must not descend: {}", stdout);
}

#[test]
fn test_plain_glyphs_and_show_root() {
    let repo = TestRepo::new();
    repo.add_file("a/b.txt", "x");
    let root_name = repo
        .path()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();

    let (stdout, _, success) = run_poplr(&repo, &["tree", "--no-fancy", "-r"]);
    assert!(success);
    assert_eq!(stdout, format!("{}/\n`-- a/\n    `-- b.txt\n\n", root_name));
}

#[test]
fn test_default_excludes_and_cli_patterns() {
    let repo = TestRepo::new();
    repo.add_file("node_modules/pkg/index.js", "x");
    repo.add_file("debug.log", "x");
    repo.add_file("tmp_cache", "x");
    repo.add_file("keep.rs", "x");

    let (stdout, _, success) =
        run_poplr(&repo, &["tree", "-e", "*.log", "-e", "/^tmp_/", "--stats"]);
    assert!(success);
    assert!(stdout.contains("keep.rs"));
    assert!(!stdout.contains("node_modules"));
    assert!(!stdout.contains("debug.log"));
    assert!(!stdout.contains("tmp_cache"));
    assert!(stdout.contains("Total Files: 1"), "{}", stdout);
    assert!(stdout.contains("Total Directories: 0"), "{}", stdout);
}

#[test]
fn test_stats_summary() {
    let repo = TestRepo::new();
    repo.add_sized_file("a.rs", 1024);
    repo.add_sized_file("b.rs", 1024);
    repo.add_sized_file("docs/c.md", 10);

    let (stdout, _, success) = run_poplr(&repo, &["tree", "--stats", "--color", "never"]);
    assert!(success);
    assert!(stdout.contains("Directory Summary"));
    assert!(stdout.contains("Total Files: 3"));
    assert!(stdout.contains("Total Directories: 1"));
    assert!(stdout.contains("Total Size: 2.01KB"), "{}", stdout);
    assert!(stdout.contains("Max Depth: 0 levels"));
    assert!(stdout.contains(&format!("{:<15} 2 files", ".rs")));
    assert!(stdout.contains(&format!("{:<15} 1 files", ".md")));
}

#[test]
fn test_json_tree_matches_console_body() {
    let repo = sample_repo();

    let (console, _, ok) = run_poplr(&repo, &["tree", "--color", "never"]);
    assert!(ok);
    let (json, _, ok) = run_poplr(&repo, &["tree", "--format", "json"]);
    assert!(ok);

    let value: Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(format!("{}\n", value["tree"].as_str().unwrap()), console);
    assert_eq!(value["config"]["format"], "json");
    assert_eq!(value["config"]["sortBy"], "directory-first");
    assert!(value["generated"].is_string());
    assert!(value.get("stats").is_none());
}

#[test]
fn test_json_config_never_claims_colors() {
    let repo = sample_repo();

    let (json, _, ok) = run_poplr(&repo, &["tree", "--format", "json", "--color", "always"]);
    assert!(ok);
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["config"]["useColors"], false);
}

#[test]
fn test_json_stats_are_structured() {
    let repo = sample_repo();

    let (json, _, ok) = run_poplr(&repo, &["tree", "--format", "json", "--stats"]);
    assert!(ok);
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["totalFiles"], 4);
    assert_eq!(value["stats"]["totalDirs"], 1);
    assert!(!value["tree"].as_str().unwrap().contains("Directory Summary"));
}

#[test]
fn test_markdown_format() {
    let repo = TestRepo::new();
    repo.add_file("docs/guide.md", "x");

    let (stdout, _, success) = run_poplr(&repo, &["tree", "--format", "markdown"]);
    assert!(success);
    assert_eq!(stdout, "## Directory Structure\n\n* docs/\n  * guide.md\n\n");
}

#[test]
fn test_sort_options() {
    let repo = TestRepo::new();
    repo.add_sized_file("small.txt", 1);
    repo.add_sized_file("big.txt", 100);
    repo.add_dir("zdir");

    let (by_size, _, ok) = run_poplr(&repo, &["tree", "--sort", "size"]);
    assert!(ok);
    let big = by_size.find("big.txt").unwrap();
    let small = by_size.find("small.txt").unwrap();
    assert!(big < small, "larger files first: {}", by_size);

    let (by_name, _, ok) = run_poplr(&repo, &["tree", "--sort", "name"]);
    assert!(ok);
    assert_eq!(by_name, "├── big.txt\n├── small.txt\n└── zdir/\n\n");

    let (dir_first, _, ok) = run_poplr(&repo, &["tree"]);
    assert!(ok);
    assert!(dir_first.starts_with("├── zdir/"));
}

#[test]
fn test_show_size() {
    let repo = TestRepo::new();
    repo.add_sized_file("data.bin", 2048);

    let (stdout, _, success) = run_poplr(&repo, &["tree", "-s"]);
    assert!(success);
    assert_eq!(stdout, "└── data.bin (2.0KB)\n\n");
}

#[test]
fn test_invalid_format_fails() {
    let repo = sample_repo();
    Command::cargo_bin("poplr")
        .unwrap()
        .current_dir(repo.path())
        .env("HOME", repo.home())
        .args(["tree", "--format", "yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "poplr: Invalid format: yaml. Must be one of: ascii, markdown, json, console",
        ));
}

#[test]
fn test_invalid_sort_fails() {
    let repo = sample_repo();
    Command::cargo_bin("poplr")
        .unwrap()
        .current_dir(repo.path())
        .env("HOME", repo.home())
        .args(["tree", "--sort", "random"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid sort type: random"));
}

#[test]
fn test_file_root_fails() {
    let repo = sample_repo();
    let (stdout, stderr, success) = run_poplr(&repo, &["tree", "README.md"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("is not a directory"), "{}", stderr);
}

#[test]
fn test_missing_root_fails() {
    let repo = sample_repo();
    let (_, stderr, success) = run_poplr(&repo, &["tree", "does-not-exist"]);
    assert!(!success);
    assert!(stderr.contains("poplr:"), "{}", stderr);
}

#[test]
fn test_export_kinds() {
    let repo = sample_repo();
    let out = repo.path().join("out");
    fs::create_dir(&out).unwrap();
    let out_arg = out.to_str().unwrap();

    for kind in ["txt", "md", "json", "html"] {
        let (stdout, stderr, success) =
            run_poplr(&repo, &["tree", "-e", "out", "--export", kind, "-o", out_arg]);
        assert!(success, "export {} failed: {}", kind, stderr);
        let path = out.join(format!("tree.{}", kind));
        assert!(stdout.contains(&format!("Tree exported to {}", path.display())));

        let content = fs::read_to_string(&path).unwrap();
        match kind {
            "txt" => assert!(content.starts_with("├── src/")),
            "md" => assert!(content.starts_with("## Directory Structure")),
            "json" => {
                let value: Value = serde_json::from_str(&content).unwrap();
                assert!(value["tree"].as_str().unwrap().contains("main.rs"));
            }
            _ => {
                assert!(content.starts_with("<!DOCTYPE html>"));
                assert!(content.contains("main.rs"));
            }
        }
        assert!(!content.contains('\u{1b}'), "exports never carry ANSI codes");
    }
}

#[test]
fn test_export_default_kind_and_timestamp_from_config() {
    let repo = sample_repo();
    repo.global_config(r#"{"export": {"defaultFormat": "markdown", "timestamp": true}}"#);

    let (stdout, stderr, success) = run_poplr(&repo, &["tree", "--export"]);
    assert!(success, "{}", stderr);

    let exported: Vec<_> = fs::read_dir(repo.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("tree-") && n.ends_with(".md"))
        .collect();
    assert_eq!(exported.len(), 1, "{}", stdout);
}

#[test]
fn test_global_config_applies() {
    let repo = sample_repo();
    repo.global_config(r#"{"display": {"fancy": false}, "sorting": {"default": "name"}}"#);

    let (stdout, _, success) = run_poplr(&repo, &["tree", "-d", "0"]);
    assert!(success);
    assert_eq!(stdout, "|-- Cargo.toml\n|-- README.md\n`-- src/\n\n");
}

#[test]
fn test_local_config_overrides_global() {
    let repo = sample_repo();
    repo.global_config(r#"{"display": {"fancy": false}}"#);
    repo.add_file(".poplrrc", r#"{"display": {"fancy": true}, "filtering": {"maxDepth": 0}}"#);

    let (stdout, _, success) = run_poplr(&repo, &["tree", "-e", ".poplrrc"]);
    assert!(success);
    assert_eq!(stdout, "├── src/\n├── Cargo.toml\n└── README.md\n\n");
}

#[test]
fn test_malformed_config_is_ignored() {
    let repo = sample_repo();
    repo.global_config("{ this is not json");

    let (stdout, _, success) = run_poplr(&repo, &["tree", "-d", "0"]);
    assert!(success);
    assert!(stdout.contains("├── src/"));
}

#[test]
fn test_init_creates_local_config() {
    let repo = TestRepo::new();

    let (stdout, _, success) = run_poplr(&repo, &["init"]);
    assert!(success);
    let path = repo.path().join(".poplrrc");
    assert!(stdout.contains("Created configuration file at"));
    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["display"]["fancy"], true);
    assert_eq!(value["filtering"]["exclude"][0], "node_modules");
}

#[test]
fn test_init_global() {
    let repo = TestRepo::new();

    let (_, _, success) = run_poplr(&repo, &["init", "--global"]);
    assert!(success);
    assert!(repo.home().join(".poplrrc").exists());
    assert!(!repo.path().join(".poplrrc").exists());
}

#[test]
fn test_config_command_prints_merged_settings() {
    let repo = TestRepo::new();
    repo.global_config(r#"{"display": {"useIcons": true}}"#);

    let (stdout, _, success) = run_poplr(&repo, &["config"]);
    assert!(success);
    let json = stdout
        .strip_prefix("Current configuration:\n")
        .expect("config header");
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["display"]["useIcons"], true);
    assert_eq!(value["sorting"]["default"], "directory-first");
}

#[test]
fn test_color_flag() {
    let repo = TestRepo::new();
    repo.add_dir("sub");

    let (always, _, ok) = run_poplr(&repo, &["tree", "--color", "always"]);
    assert!(ok);
    assert!(always.contains('\u{1b}'));

    let (ascii, _, ok) = run_poplr(&repo, &["tree", "--color", "always", "-f", "ascii"]);
    assert!(ok);
    assert!(!ascii.contains('\u{1b}'), "only console output is colored");

    let (never, _, ok) = run_poplr(&repo, &["tree", "--color", "never"]);
    assert!(ok);
    assert_eq!(never, "└── sub/\n\n");
}
