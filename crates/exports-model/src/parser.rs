//! Parser for the line-oriented exports grammar
//!
//! Recognized directive lines take the form
//! `path client1(opt,opt) client2 ...` with an optionally double-quoted
//! path. Blank lines, `#` comments, and lines that do not look like a
//! directive at all become opaque pass-through. A line that does look like
//! a directive (leading `/` or `"`) but is structurally broken is a parse
//! error.

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::options::OptionSet;
use crate::table::{Table, TableLine};

/// Parse exports-file text into a [`Table`].
pub fn parse(text: &str) -> Result<Table> {
    let mut table = Table::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || !looks_like_directive(trimmed) {
            table.push_line(TableLine::Opaque(raw.to_string()));
            continue;
        }
        let entries = parse_directive(trimmed, idx + 1)?;
        table.push_line(TableLine::Exports {
            original: Some(raw.to_string()),
            entries,
        });
    }
    Ok(table)
}

/// Export paths are absolute; a line opening with `/` (or a quoted path)
/// is a directive, anything else is somebody else's content.
fn looks_like_directive(trimmed: &str) -> bool {
    trimmed.starts_with('/') || trimmed.starts_with('"')
}

/// Parse one directive line into its entries.
///
/// `path` alone with no client groups is legal and yields zero entries;
/// the line text is still preserved by the caller. A bare `(opts)` group
/// stands for the wildcard client, per historical exportfs behavior.
fn parse_directive(trimmed: &str, line_no: usize) -> Result<Vec<Entry>> {
    let err = |message: &str| Error::parse(line_no, trimmed, message);

    let (path, rest) = take_path(trimmed).ok_or_else(|| err("unterminated quoted path"))?;
    if path.is_empty() {
        return Err(err("empty export path"));
    }

    let mut entries = Vec::new();
    for group in strip_comment(rest).split_whitespace() {
        let (client, raw_options) = split_group(group).map_err(err)?;
        let options = OptionSet::parse(raw_options)?;
        entries.push(Entry::new(path, client, options));
    }
    Ok(entries)
}

/// Drop an end-of-line `#` comment. exports(5) allows one after the client
/// groups; everything from the marker on is operator prose, not clients.
fn strip_comment(rest: &str) -> &str {
    match rest.find('#') {
        Some(pos) => &rest[..pos],
        None => rest,
    }
}

/// Split off the leading path token, honoring double quotes.
/// Returns `None` on an unterminated quote.
fn take_path(line: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = line.strip_prefix('"') {
        let close = quoted.find('"')?;
        Some((&quoted[..close], &quoted[close + 1..]))
    } else {
        match line.split_once(char::is_whitespace) {
            Some((path, rest)) => Some((path, rest)),
            None => Some((line, "")),
        }
    }
}

/// Split a `client(options)` group into client and raw option list.
///
/// Accepted forms: `client`, `client(opts)`, and `(opts)` for the wildcard
/// client. Anything with stray or unterminated parens is structural
/// breakage.
fn split_group(group: &str) -> std::result::Result<(&str, &str), &'static str> {
    match group.find('(') {
        Some(open) => {
            let Some(inner) = group[open + 1..].strip_suffix(')') else {
                return Err("unterminated option group");
            };
            if inner.contains('(') || inner.contains(')') {
                return Err("nested option group");
            }
            let client = &group[..open];
            Ok((if client.is_empty() { "*" } else { client }, inner))
        }
        None if group.contains(')') => Err("unmatched ')' in client group"),
        None => Ok((group, "")),
    }
}
