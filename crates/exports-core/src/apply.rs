//! Change applier: parse → reconcile → serialize → conditional write/reload
//!
//! [`apply_to_text`] is the pure engine; [`Driver`] wraps it with the
//! filesystem and the reload collaborator, converting every error into the
//! caller-facing [`Outcome`] at the boundary.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use exports_fs::{Reloader, path_is_exportable, read_text, write_atomic};

use crate::error::{Error, Result};
use crate::reconcile::{ReconcileSummary, plan, reconcile};
use crate::request::{Action, ExportRequest};

/// Result of running a request against exports-file text
#[derive(Debug, Clone)]
pub struct ApplyResult {
    pub new_text: String,
    pub changed: bool,
    pub summary: ReconcileSummary,
}

/// Caller-facing outcome envelope.
///
/// `error` is empty on success; a non-empty `error` with `changed = true`
/// means the file was written but the reload collaborator failed.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Echo of the request name
    pub name: String,
    pub changed: bool,
    pub message: String,
    pub error: String,
    /// The would-be file content, present only for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl Outcome {
    fn failure(request: &ExportRequest, error: &Error) -> Self {
        Self {
            name: request.name.clone(),
            changed: false,
            message: "export reconciliation failed".to_string(),
            error: error.to_string(),
            preview: None,
        }
    }
}

/// Options for one driver run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute the outcome without writing or reloading
    pub dry_run: bool,
}

/// Run a request against exports text: validate, parse, reconcile,
/// serialize. The changed verdict compares old and new text, so a
/// request that converges to the current state reports unchanged.
pub fn apply_to_text(current: &str, request: &ExportRequest) -> Result<ApplyResult> {
    request.validate()?;
    let mut table = exports_model::parse(current)?;
    let ops = plan(request)?;
    tracing::debug!(operations = ops.len(), "reconciling export request");
    let (_, summary) = reconcile(&mut table, &ops)?;
    let new_text = exports_model::serialize(&table);
    let changed = new_text != current;
    Ok(ApplyResult {
        new_text,
        changed,
        summary,
    })
}

/// Orchestrates one read-reconcile-write-reload pass over a real file
pub struct Driver {
    exports_path: PathBuf,
    reloader: Box<dyn Reloader>,
    check_paths: bool,
}

impl Driver {
    pub fn new(exports_path: impl Into<PathBuf>, reloader: Box<dyn Reloader>) -> Self {
        Self {
            exports_path: exports_path.into(),
            reloader,
            check_paths: true,
        }
    }

    /// Disable the exported-path existence check (tests, staged files)
    pub fn without_path_check(mut self) -> Self {
        self.check_paths = false;
        self
    }

    /// Run one request. Never returns an error: every failure is folded
    /// into the outcome's `error` field.
    pub fn run(&self, request: &ExportRequest, options: &RunOptions) -> Outcome {
        match self.try_run(request, options) {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failure(request, &error),
        }
    }

    fn try_run(&self, request: &ExportRequest, options: &RunOptions) -> Result<Outcome> {
        if request.action == Action::Add
            && self.check_paths
            && !path_is_exportable(Path::new(&request.path))
        {
            return Err(Error::validation(
                "path",
                format!("{} does not exist or is not a directory", request.path),
            ));
        }

        // A missing exports file reads as empty; the write creates it.
        let current = match read_text(&self.exports_path) {
            Ok(text) => text,
            Err(exports_fs::Error::Io { ref source, .. })
                if source.kind() == ErrorKind::NotFound =>
            {
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let result = apply_to_text(&current, request)?;
        let mut outcome = Outcome {
            name: request.name.clone(),
            changed: result.changed,
            message: result.summary.describe(),
            error: String::new(),
            preview: None,
        };

        if options.dry_run {
            outcome.preview = Some(result.new_text);
            return Ok(outcome);
        }

        if result.changed {
            write_atomic(&self.exports_path, result.new_text.as_bytes())?;
            if request.update
                && let Err(e) = self.reloader.reload()
            {
                // The write stands; reload failure is reported, not rolled back.
                outcome.error = e.to_string();
            }
        }

        Ok(outcome)
    }
}
