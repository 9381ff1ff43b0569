//! Reconciler: ordered operations against one evolving table
//!
//! A request plans into an explicit operation list (optional clear-all
//! pre-step, then one add or remove per client), applied strictly in
//! sequence. Every operation reports its own changed verdict; the applier
//! settles the final verdict by comparing serialized text.

use exports_model::{Entry, Table};

use crate::error::{Error, Result};
use crate::request::{Action, ExportRequest};

/// One table transition
#[derive(Debug, Clone)]
pub enum Operation {
    /// Drop every export directive, keeping comments and blank lines
    ClearAll,
    Add {
        path: String,
        client: String,
        options: exports_model::OptionSet,
    },
    Remove {
        path: String,
        client: String,
    },
}

/// Counts of what a reconciliation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReconcileSummary {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub cleared: usize,
}

impl ReconcileSummary {
    /// Human-readable summary for the outcome message
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.cleared > 0 {
            parts.push(format!("cleared {}", self.cleared));
        }
        if self.added > 0 {
            parts.push(format!("added {}", self.added));
        }
        if self.updated > 0 {
            parts.push(format!("updated {}", self.updated));
        }
        if self.removed > 0 {
            parts.push(format!("removed {}", self.removed));
        }
        if parts.is_empty() {
            "no export entries changed".to_string()
        } else {
            format!("{} export entries", parts.join(", "))
        }
    }
}

/// Expand a request into its ordered operation list.
pub fn plan(request: &ExportRequest) -> Result<Vec<Operation>> {
    let mut ops = Vec::new();
    if request.clear_all {
        ops.push(Operation::ClearAll);
    }
    for client in &request.clients {
        ops.push(match request.action {
            Action::Add => Operation::Add {
                path: request.path.clone(),
                client: client.clone(),
                options: request.compose_options()?,
            },
            Action::Remove => Operation::Remove {
                path: request.path.clone(),
                client: client.clone(),
            },
        });
    }
    Ok(ops)
}

/// Apply one operation, returning whether it changed the table.
pub fn apply_operation(
    table: &mut Table,
    op: &Operation,
    summary: &mut ReconcileSummary,
) -> Result<bool> {
    match op {
        Operation::ClearAll => {
            let cleared = table.clear_directives();
            summary.cleared += cleared;
            tracing::debug!(cleared, "cleared export directives");
            Ok(cleared > 0)
        }
        Operation::Add {
            path,
            client,
            options,
        } => {
            let current = table.get(path, client).map(|e| e.options.clone());
            match current {
                Some(current) => {
                    let mut merged = current.clone();
                    merged.merge(options);
                    if merged == current {
                        return Ok(false);
                    }
                    if !table.set_options(path, client, merged) {
                        return Err(Error::DuplicateEntry {
                            path: path.clone(),
                            client: client.clone(),
                        });
                    }
                    summary.updated += 1;
                    tracing::debug!(%path, %client, "updated export entry");
                    Ok(true)
                }
                None => {
                    table.insert(Entry::new(path.clone(), client.clone(), options.clone()));
                    summary.added += 1;
                    tracing::debug!(%path, %client, "added export entry");
                    Ok(true)
                }
            }
        }
        Operation::Remove { path, client } => {
            // Absence is a no-op, not an error.
            let removed = table.remove(path, client);
            if removed {
                summary.removed += 1;
                tracing::debug!(%path, %client, "removed export entry");
            }
            Ok(removed)
        }
    }
}

/// Apply an operation list in order. Returns the overall changed verdict
/// and the accumulated summary.
pub fn reconcile(table: &mut Table, ops: &[Operation]) -> Result<(bool, ReconcileSummary)> {
    let mut summary = ReconcileSummary::default();
    let mut changed = false;
    for op in ops {
        changed |= apply_operation(table, op, &mut summary)?;
    }
    Ok((changed, summary))
}
