//! Serializer for the exports grammar
//!
//! Clean lines re-emit their original text; lines touched by the
//! reconciler are rendered one rule per line. Output lines are
//! right-trimmed and the text always ends with exactly one newline
//! (or is empty).

use crate::table::{Table, TableLine};

/// Serialize a [`Table`] back to exports-file text.
pub fn serialize(table: &Table) -> String {
    let mut out = String::new();
    for line in table.lines() {
        match line {
            TableLine::Opaque(raw) => {
                out.push_str(raw.trim_end());
                out.push('\n');
            }
            TableLine::Exports {
                original: Some(raw),
                ..
            } => {
                out.push_str(raw.trim_end());
                out.push('\n');
            }
            TableLine::Exports {
                original: None,
                entries,
            } => {
                for entry in entries {
                    out.push_str(&entry.render());
                    out.push('\n');
                }
            }
        }
    }
    out
}
