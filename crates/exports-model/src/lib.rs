//! Exports-file data model for Exports Manager
//!
//! Parses the line-oriented exports grammar into an ordered table of export
//! rules, supports format-preserving edits, and serializes back to text.

pub mod entry;
pub mod error;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod table;

pub use entry::Entry;
pub use error::{Error, Result};
pub use options::{DEFAULT_SECURITY, OptionSet, OptionToken};
pub use parser::parse;
pub use serializer::serialize;
pub use table::Table;
