//! A single export rule: path, client specifier, option set

use std::borrow::Cow;

use crate::options::OptionSet;

/// One export rule.
///
/// The client specifier is opaque to the engine: `*`, a hostname, an IP
/// literal, a CIDR range, a domain wildcard, or a `@netgroup`. No resolution
/// is performed; lookups compare the exact string, ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub client: String,
    pub options: OptionSet,
}

impl Entry {
    pub fn new(path: impl Into<String>, client: impl Into<String>, options: OptionSet) -> Self {
        Self {
            path: path.into(),
            client: client.into(),
            options,
        }
    }

    /// Exact-string match on (path, client); client is case-insensitive.
    pub fn matches(&self, path: &str, client: &str) -> bool {
        self.path == path && self.client.eq_ignore_ascii_case(client)
    }

    /// Single-line textual form: `path client(opt1,opt2,...)`.
    ///
    /// An entry with no options renders as a bare client. Paths containing
    /// whitespace are double-quoted.
    pub fn render(&self) -> String {
        let path = quote_path(&self.path);
        if self.options.is_empty() {
            format!("{path} {client}", client = self.client)
        } else {
            format!(
                "{path} {client}({options})",
                client = self.client,
                options = self.options.render()
            )
        }
    }
}

pub(crate) fn quote_path(path: &str) -> Cow<'_, str> {
    if path.contains(char::is_whitespace) {
        Cow::Owned(format!("\"{path}\""))
    } else {
        Cow::Borrowed(path)
    }
}
