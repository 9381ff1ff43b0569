//! The ordered table of export rules and pass-through lines
//!
//! The table mirrors the file line by line. Every line keeps its original
//! text until one of its entries is mutated, so untouched lines re-emit
//! byte-identically. Lines the parser does not understand are opaque
//! pass-through and are never merged or reordered.

use crate::entry::Entry;
use crate::options::OptionSet;

/// One line of the exports file
#[derive(Debug, Clone)]
pub(crate) enum TableLine {
    /// Comment, blank, or unrecognized line, re-emitted verbatim
    Opaque(String),
    /// An export directive carrying zero or more entries.
    ///
    /// `original` holds the on-disk text; it is cleared when any entry on
    /// the line changes, switching the line to rendered one-rule-per-line
    /// output.
    Exports {
        original: Option<String>,
        entries: Vec<Entry>,
    },
}

/// Ordered collection of entries and pass-through lines from one file.
///
/// Built fresh from text for each reconciliation pass, mutated only by the
/// reconciler, discarded once serialized. Invariant: at most one entry per
/// (path, client) pair among entries this engine manages.
#[derive(Debug, Clone, Default)]
pub struct Table {
    lines: Vec<TableLine>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_line(&mut self, line: TableLine) {
        self.lines.push(line);
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &TableLine> {
        self.lines.iter()
    }

    /// All entries in file order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().flat_map(|line| match line {
            TableLine::Exports { entries, .. } => entries.as_slice(),
            TableLine::Opaque(_) => &[],
        })
    }

    /// Number of entries (not lines)
    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the entry for a (path, client) pair
    pub fn get(&self, path: &str, client: &str) -> Option<&Entry> {
        self.entries().find(|e| e.matches(path, client))
    }

    /// Replace the options of an existing entry, marking its line dirty.
    ///
    /// Returns false when no entry matches.
    pub fn set_options(&mut self, path: &str, client: &str, options: OptionSet) -> bool {
        for line in &mut self.lines {
            if let TableLine::Exports { original, entries } = line
                && let Some(entry) = entries.iter_mut().find(|e| e.matches(path, client))
            {
                entry.options = options;
                *original = None;
                return true;
            }
        }
        false
    }

    /// Append a new entry at the end of its path group, or at the end of
    /// the table for a new path. The entry gets its own rendered line, so
    /// existing line groupings are left untouched.
    pub fn insert(&mut self, entry: Entry) {
        let after = self.lines.iter().rposition(|l| {
            matches!(l, TableLine::Exports { entries, .. } if entries.iter().any(|e| e.path == entry.path))
        });
        let line = TableLine::Exports {
            original: None,
            entries: vec![entry],
        };
        match after {
            Some(idx) => self.lines.insert(idx + 1, line),
            None => self.lines.push(line),
        }
    }

    /// Remove the entry for a (path, client) pair.
    ///
    /// The surviving entries of a shared line keep their relative order but
    /// the line is re-rendered; a line left with no entries is dropped.
    /// Returns false when no entry matches.
    pub fn remove(&mut self, path: &str, client: &str) -> bool {
        let target = self.lines.iter().enumerate().find_map(|(idx, line)| {
            let TableLine::Exports { entries, .. } = line else {
                return None;
            };
            entries
                .iter()
                .position(|e| e.matches(path, client))
                .map(|pos| (idx, pos))
        });
        let Some((idx, pos)) = target else {
            return false;
        };

        let TableLine::Exports { original, entries } = &mut self.lines[idx] else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.lines.remove(idx);
        } else {
            *original = None;
        }
        true
    }

    /// Drop every directive line, keeping full-line comments and blanks.
    ///
    /// Opaque lines that are neither comments nor blank are discarded too:
    /// they are unrecognized directives from the engine's point of view.
    /// Returns the number of entries discarded.
    pub fn clear_directives(&mut self) -> usize {
        let mut removed = 0;
        self.lines.retain(|line| match line {
            TableLine::Opaque(raw) => {
                let trimmed = raw.trim();
                trimmed.is_empty() || trimmed.starts_with('#')
            }
            TableLine::Exports { entries, .. } => {
                removed += entries.len();
                false
            }
        });
        removed
    }
}
