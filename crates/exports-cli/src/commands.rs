//! Command implementations: build requests, drive the core, print outcomes

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde::Deserialize;

use exports_core::{Driver, ExportRequest, Outcome, RunOptions};
use exports_fs::ExportfsReloader;

use crate::error::{CliError, Result};

/// A request file holds one request or an ordered list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestFile {
    One(ExportRequest),
    Many(Vec<ExportRequest>),
}

pub fn run_request(file: &Path, request: &ExportRequest, dry_run: bool, json: bool) -> Result<()> {
    let driver = Driver::new(file, Box::new(ExportfsReloader::new()));
    let outcome = driver.run(request, &RunOptions { dry_run });
    report(&outcome, json)?;
    finish(outcome)
}

pub fn run_request_file(file: &Path, request_path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let raw = fs::read_to_string(request_path)?;
    let requests = match serde_json::from_str::<RequestFile>(&raw)? {
        RequestFile::One(request) => vec![request],
        RequestFile::Many(requests) => requests,
    };
    if requests.is_empty() {
        return Err(CliError::user("request file contains no requests"));
    }

    let driver = Driver::new(file, Box::new(ExportfsReloader::new()));
    for request in &requests {
        let outcome = driver.run(request, &RunOptions { dry_run });
        report(&outcome, json)?;
        // Requests run strictly in order; a failed one is terminal.
        if !outcome.error.is_empty() {
            return finish(outcome);
        }
    }
    Ok(())
}

fn report(outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if !outcome.error.is_empty() {
        println!(
            "{} {}: {}",
            "failed".red().bold(),
            outcome.name,
            outcome.message
        );
    } else if outcome.changed {
        println!(
            "{} {}: {}",
            "changed".yellow().bold(),
            outcome.name,
            outcome.message
        );
    } else {
        println!("{} {}: {}", "ok".green().bold(), outcome.name, outcome.message);
    }

    if let Some(preview) = &outcome.preview {
        print!("{preview}");
    }
    Ok(())
}

fn finish(outcome: Outcome) -> Result<()> {
    if outcome.error.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(outcome.error))
    }
}
