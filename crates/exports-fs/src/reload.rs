//! Export-table reload collaborator
//!
//! Reloading is decoupled from deciding to reload: the core reports a
//! changed verdict, the caller invokes a [`Reloader`]. The real
//! implementation shells out to `exportfs -a`; tests inject a double.

use std::process::Command;

use crate::{Error, Result};

/// Outcome of one reload invocation
#[derive(Debug, Clone)]
pub struct ReloadReport {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Collaborator that re-reads the kernel's export table
pub trait Reloader {
    fn reload(&self) -> Result<ReloadReport>;
}

/// Runs `exportfs -a` (or a configured substitute) as a subprocess
#[derive(Debug, Clone)]
pub struct ExportfsReloader {
    command: String,
    args: Vec<String>,
}

impl ExportfsReloader {
    pub fn new() -> Self {
        Self::with_command("/usr/sbin/exportfs", ["-a"])
    }

    pub fn with_command(
        command: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ExportfsReloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reloader for ExportfsReloader {
    fn reload(&self) -> Result<ReloadReport> {
        let output = self
            .command_line()
            .output()
            .map_err(|e| Error::ReloadFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        let report = ReloadReport {
            command: self.command.clone(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        if output.status.success() {
            tracing::debug!(command = %report.command, "export table reloaded");
            Ok(report)
        } else {
            let stderr_snippet = report.stderr.trim();
            let message = if stderr_snippet.is_empty() {
                format!("exited with non-zero status (exit code: {:?})", report.exit_code)
            } else {
                format!(
                    "exited with non-zero status (exit code: {:?}): {}",
                    report.exit_code, stderr_snippet
                )
            };
            Err(Error::ReloadFailed {
                command: report.command,
                message,
            })
        }
    }
}

impl ExportfsReloader {
    fn command_line(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        cmd
    }
}
