//! Filesystem layer for Exports Manager
//!
//! Locked atomic writes for the exports file, the export-table reload
//! collaborator, and the path-existence check performed before an add.

pub mod error;
pub mod io;
pub mod reload;

pub use error::{Error, Result};
pub use io::{path_is_exportable, read_text, write_atomic};
pub use reload::{ExportfsReloader, ReloadReport, Reloader};
