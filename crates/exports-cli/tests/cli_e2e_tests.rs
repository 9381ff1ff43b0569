//! CLI end-to-end tests that invoke the compiled `exportctl` binary.
//!
//! Uses `env!("CARGO_BIN_EXE_exportctl")` to locate the binary and drives
//! it against temporary exports files. All runs pass `--no-update` so no
//! real export-table reload is attempted.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn exportctl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_exportctl"))
}

fn run(args: &[&str]) -> Output {
    Command::new(exportctl_bin())
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute exportctl binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

struct Fixture {
    _temp: TempDir,
    exports: PathBuf,
    share: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let exports = temp.path().join("exports");
        let share = temp.path().join("share");
        fs::create_dir(&share).unwrap();
        Self {
            _temp: temp,
            exports,
            share,
        }
    }

    fn exports_str(&self) -> &str {
        self.exports.to_str().unwrap()
    }

    fn share_str(&self) -> &str {
        self.share.to_str().unwrap()
    }

    fn exports_content(&self) -> String {
        fs::read_to_string(&self.exports).unwrap()
    }
}

#[test]
fn test_add_creates_rule() {
    let fx = Fixture::new();
    let output = run(&[
        "--file",
        fx.exports_str(),
        "add",
        fx.share_str(),
        "-c",
        "*",
        "--read-write",
        "--no-update",
    ]);

    assert!(output.status.success());
    assert!(contains("changed").eval(&stdout(&output)));
    assert_eq!(fx.exports_content(), format!("{} *(rw)\n", fx.share_str()));
}

#[test]
fn test_add_is_idempotent_across_runs() {
    let fx = Fixture::new();
    let args = [
        "--file",
        fx.exports_str(),
        "add",
        fx.share_str(),
        "-c",
        "*",
        "--no-update",
    ];

    let first = run(&args);
    assert!(first.status.success());
    assert!(contains("changed").eval(&stdout(&first)));

    let second = run(&args);
    assert!(second.status.success());
    assert!(contains("ok").eval(&stdout(&second)));
    assert_eq!(fx.exports_content(), format!("{} *(ro)\n", fx.share_str()));
}

#[test]
fn test_remove_then_remove_is_not_an_error() {
    let fx = Fixture::new();
    fs::write(&fx.exports, format!("{} *(ro)\n", fx.share_str())).unwrap();

    let args = [
        "--file",
        fx.exports_str(),
        "remove",
        fx.share_str(),
        "-c",
        "*",
        "--no-update",
    ];
    assert!(run(&args).status.success());
    assert_eq!(fx.exports_content(), "");
    assert!(run(&args).status.success());
}

#[test]
fn test_json_outcome_is_parseable() {
    let fx = Fixture::new();
    let output = run(&[
        "--file",
        fx.exports_str(),
        "--json",
        "add",
        fx.share_str(),
        "-c",
        "10.0.0.0/24",
        "--no-update",
        "--name",
        "converge",
    ]);

    assert!(output.status.success());
    let outcome: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(outcome["name"], "converge");
    assert_eq!(outcome["changed"], true);
    assert_eq!(outcome["error"], "");
}

#[test]
fn test_dry_run_prints_preview_without_writing() {
    let fx = Fixture::new();
    fs::write(&fx.exports, "# managed\n").unwrap();

    let output = run(&[
        "--file",
        fx.exports_str(),
        "add",
        fx.share_str(),
        "-c",
        "*",
        "--no-update",
        "--dry-run",
    ]);

    assert!(output.status.success());
    assert!(contains("*(ro)").eval(&stdout(&output)));
    assert_eq!(fx.exports_content(), "# managed\n");
}

#[test]
fn test_add_missing_path_fails_without_touching_file() {
    let fx = Fixture::new();
    fs::write(&fx.exports, "# untouched\n").unwrap();
    let missing = fx.share.join("nope");

    let output = run(&[
        "--file",
        fx.exports_str(),
        "add",
        missing.to_str().unwrap(),
        "-c",
        "*",
        "--no-update",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(contains("does not exist").eval(&stderr));
    assert_eq!(fx.exports_content(), "# untouched\n");
}

#[test]
fn test_apply_request_file_in_order() {
    let fx = Fixture::new();
    let request_path = fx.share.parent().unwrap().join("request.json");
    let requests = serde_json::json!([
        {
            "name": "clear and add",
            "action": "add",
            "clear_all": true,
            "update": false,
            "path": fx.share_str(),
            "clients": "*",
            "read_only": false,
            "security": "krb5p:krb5i:krb5"
        },
        {
            "name": "second client",
            "action": "add",
            "update": false,
            "path": fx.share_str(),
            "clients": "trusted.example.com"
        }
    ]);
    fs::write(&request_path, requests.to_string()).unwrap();
    fs::write(&fx.exports, "/old *(rw)\n").unwrap();

    let output = run(&[
        "--file",
        fx.exports_str(),
        "apply",
        request_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let expected = format!(
        "{share} *(rw,sec=krb5p:krb5i:krb5)\n{share} trusted.example.com(ro)\n",
        share = fx.share_str()
    );
    assert_eq!(fx.exports_content(), expected);
}

#[test]
fn test_opaque_lines_survive_cli_edits() {
    let fx = Fixture::new();
    fs::write(&fx.exports, "# header\nsome other tool's line\n").unwrap();

    let output = run(&[
        "--file",
        fx.exports_str(),
        "add",
        fx.share_str(),
        "-c",
        "*",
        "--no-update",
    ]);

    assert!(output.status.success());
    assert_eq!(
        fx.exports_content(),
        format!(
            "# header\nsome other tool's line\n{} *(ro)\n",
            fx.share_str()
        )
    );
}
