//! Reconciliation engine for Exports Manager
//!
//! Applies structured add/remove/clear requests against an exports file:
//! parse, reconcile, serialize, and conditionally write and reload. All
//! errors are converted into the caller-facing [`Outcome`] envelope at the
//! applier boundary.

pub mod apply;
pub mod error;
pub mod reconcile;
pub mod request;

pub use apply::{ApplyResult, Driver, Outcome, RunOptions, apply_to_text};
pub use error::{Error, Result};
pub use reconcile::{Operation, ReconcileSummary, plan, reconcile};
pub use request::{Action, ExportRequest};
