//! End-to-end convergence scenarios over real files.
//!
//! These mirror how automation drives the engine: a sequence of structured
//! requests against one exports file, each run expected to converge, with
//! unrelated file content left untouched throughout.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use exports_core::{Action, Driver, ExportRequest, RunOptions};
use exports_fs::{ReloadReport, Reloader};

#[derive(Clone, Default)]
struct CountingReloader {
    calls: Rc<Cell<usize>>,
}

impl Reloader for CountingReloader {
    fn reload(&self) -> exports_fs::Result<ReloadReport> {
        self.calls.set(self.calls.get() + 1);
        Ok(ReloadReport {
            command: "mock".to_string(),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }
}

struct Host {
    _temp: TempDir,
    exports: PathBuf,
    driver: Driver,
    reloads: Rc<Cell<usize>>,
}

impl Host {
    fn new(initial: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let exports = temp.path().join("exports");
        if !initial.is_empty() {
            fs::write(&exports, initial).unwrap();
        }
        let reloader = CountingReloader::default();
        let reloads = reloader.calls.clone();
        let driver = Driver::new(&exports, Box::new(reloader)).without_path_check();
        Self {
            _temp: temp,
            exports,
            driver,
            reloads,
        }
    }

    fn content(&self) -> String {
        fs::read_to_string(&self.exports).unwrap()
    }
}

fn add(path: &str, client: &str) -> ExportRequest {
    ExportRequest {
        name: "converge".to_string(),
        action: Action::Add,
        update: true,
        clear_all: false,
        path: path.to_string(),
        clients: vec![client.to_string()],
        read_only: true,
        root_squash: true,
        all_squash: false,
        security: "sys".to_string(),
        options: String::new(),
    }
}

#[test]
fn test_replace_workflow_clear_then_add_then_add() {
    // The "replace existing exports with two new ones" workflow: first
    // request clears and adds, second adds with reload.
    let host = Host::new("/stale *(rw)\n/other host(ro)\n");

    let mut first = add("/home", "*");
    first.clear_all = true;
    first.read_only = false;
    first.security = "krb5p:krb5i:krb5".to_string();
    first.update = false;

    let outcome = host.driver.run(&first, &RunOptions::default());
    assert!(outcome.changed);
    assert_eq!(host.reloads.get(), 0);

    let second = add("/extras", "*");
    let outcome = host.driver.run(&second, &RunOptions::default());
    assert!(outcome.changed);
    assert_eq!(host.reloads.get(), 1);

    assert_eq!(
        host.content(),
        "/home *(rw,sec=krb5p:krb5i:krb5)\n/extras *(ro)\n"
    );
}

#[test]
fn test_repeated_convergence_stops_reloading() {
    let host = Host::new("");
    let mut request = add("/share", "10.0.0.0/24");
    request.read_only = false;

    for round in 0..3 {
        let outcome = host.driver.run(&request, &RunOptions::default());
        assert_eq!(outcome.changed, round == 0, "round {round}");
    }
    assert_eq!(host.reloads.get(), 1);
    assert_eq!(host.content(), "/share 10.0.0.0/24(rw)\n");
}

#[test]
fn test_operator_file_survives_management() {
    let initial = "\
# /etc/exports: operator notes here
/srv/media    htpc(ro,all_squash)   laptop.example.com(ro)

# staging area below
/srv/staging  @builders(rw,no_root_squash)
";
    let host = Host::new(initial);

    // Converge a new rule, then retract an old one.
    let mut grant = add("/srv/media", "backup.example.com");
    grant.read_only = false;
    assert!(host.driver.run(&grant, &RunOptions::default()).changed);

    let mut retract = add("/srv/staging", "@builders");
    retract.action = Action::Remove;
    assert!(host.driver.run(&retract, &RunOptions::default()).changed);

    assert_eq!(
        host.content(),
        "\
# /etc/exports: operator notes here
/srv/media    htpc(ro,all_squash)   laptop.example.com(ro)
/srv/media backup.example.com(rw)

# staging area below
"
    );
}

#[test]
fn test_request_json_round_trip_through_driver() {
    let host = Host::new("");
    let raw = serde_json::json!({
        "name": "from automation",
        "action": "add",
        "path": "/backup",
        "clients": ["one.example.com", "two.example.com"],
        "read_only": true,
        "all_squash": true,
        "update": false
    });
    let request: ExportRequest = serde_json::from_value(raw).unwrap();

    let outcome = host.driver.run(&request, &RunOptions::default());
    assert!(outcome.changed);
    assert_eq!(outcome.name, "from automation");
    assert_eq!(
        host.content(),
        "/backup one.example.com(ro,all_squash)\n/backup two.example.com(ro,all_squash)\n"
    );
}

#[test]
fn test_changed_text_verdict_matches_disk_state() {
    let host = Host::new("/home *(ro)\n");
    let before = host.content();

    let outcome = host.driver.run(&add("/home", "*"), &RunOptions::default());
    assert!(!outcome.changed);
    assert_eq!(host.content(), before);
    assert_eq!(host.reloads.get(), 0);
}
