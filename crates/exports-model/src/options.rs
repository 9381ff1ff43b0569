//! Export option tokens and the ordered option set
//!
//! Options are either bare flags (`ro`, `no_root_squash`) or `key=value`
//! pairs (`sec=krb5p:krb5i:krb5`). Within one entry every name is unique;
//! merging overwrites by name and enforces the mutually exclusive pairs
//! (`ro`/`rw`, `root_squash`/`no_root_squash`, `all_squash`/`no_root_squash`).

use crate::error::{Error, Result};

/// The security flavor the server assumes when no `sec=` option is present.
///
/// Composing request options omits `sec=sys` so that an all-default add
/// against an entry that never mentions `sec` converges without a rewrite.
pub const DEFAULT_SECURITY: &str = "sys";

/// A single export option token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionToken {
    /// Bare flag, e.g. `rw` or `all_squash`
    Flag(String),
    /// `key=value` pair, e.g. `sec=krb5i`
    KeyValue { key: String, value: String },
}

impl OptionToken {
    /// Parse one token. A `key=value` token with an empty key is malformed.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once('=') {
            Some(("", _)) => Err(Error::invalid_option(raw, "empty key")),
            Some((key, value)) => Ok(Self::KeyValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
            None => Ok(Self::Flag(raw.to_string())),
        }
    }

    /// The name the token is keyed by (the flag itself, or the key)
    pub fn name(&self) -> &str {
        match self {
            Self::Flag(name) => name,
            Self::KeyValue { key, .. } => key,
        }
    }

    /// Textual form as it appears inside an option group
    pub fn render(&self) -> String {
        match self {
            Self::Flag(name) => name.clone(),
            Self::KeyValue { key, value } => format!("{key}={value}"),
        }
    }
}

/// Render-order class of an option name: access mode first, then squash
/// flags, then security, then free-form extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum OptionClass {
    Access,
    Squash,
    Security,
    Extra,
}

fn class_of(name: &str) -> OptionClass {
    match name {
        "ro" | "rw" => OptionClass::Access,
        "root_squash" | "no_root_squash" | "all_squash" => OptionClass::Squash,
        "sec" => OptionClass::Security,
        _ => OptionClass::Extra,
    }
}

/// Names that cannot coexist with the given option name
fn conflicts_with(name: &str) -> &'static [&'static str] {
    match name {
        "ro" => &["rw"],
        "rw" => &["ro"],
        "root_squash" => &["no_root_squash"],
        "no_root_squash" => &["root_squash", "all_squash"],
        "all_squash" => &["no_root_squash"],
        _ => &[],
    }
}

/// Ordered set of option tokens, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    tokens: Vec<OptionToken>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma- or whitespace-delimited option list.
    ///
    /// Empty segments are skipped, so `ro,,sync` and `ro, sync` both parse.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut set = Self::new();
        for token in raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            set.set(OptionToken::parse(token)?);
        }
        Ok(set)
    }

    /// Compose the option set for a structured export request.
    ///
    /// Mirrors the request defaults: `ro` unless read-write is asked for,
    /// `root_squash` left implicit (it is the server default), `sec=` only
    /// for a non-default flavor list, then any free-form extras merged last.
    pub fn compose(
        read_only: bool,
        root_squash: bool,
        all_squash: bool,
        security: &str,
        extras: &str,
    ) -> Result<Self> {
        let mut set = Self::new();
        set.set(OptionToken::Flag(
            if read_only { "ro" } else { "rw" }.to_string(),
        ));
        if !root_squash {
            set.set(OptionToken::Flag("no_root_squash".to_string()));
        }
        if all_squash {
            set.set(OptionToken::Flag("all_squash".to_string()));
        }
        if !security.is_empty() && security != DEFAULT_SECURITY {
            set.set(OptionToken::KeyValue {
                key: "sec".to_string(),
                value: security.to_string(),
            });
        }
        if !extras.is_empty() {
            set.merge(&Self::parse(extras)?);
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&OptionToken> {
        self.tokens.iter().find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionToken> {
        self.tokens.iter()
    }

    /// Insert or overwrite a token by name, clearing any conflicting names.
    ///
    /// Overwriting an existing name keeps its position; new names append.
    pub fn set(&mut self, token: OptionToken) {
        for conflict in conflicts_with(token.name()) {
            self.tokens.retain(|t| t.name() != *conflict);
        }
        match self.tokens.iter_mut().find(|t| t.name() == token.name()) {
            Some(slot) => *slot = token,
            None => self.tokens.push(token),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t.name() != name);
        self.tokens.len() != before
    }

    /// Overlay `incoming` onto this set: incoming names win, names not
    /// mentioned by `incoming` are preserved.
    pub fn merge(&mut self, incoming: &OptionSet) {
        for token in &incoming.tokens {
            self.set(token.clone());
        }
    }

    /// Render as a comma-joined list in canonical order: access mode,
    /// squash flags, security, then extras in first-introduction order.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&OptionToken> = self.tokens.iter().collect();
        ordered.sort_by_key(|t| class_of(t.name()));
        ordered
            .iter()
            .map(|t| t.render())
            .collect::<Vec<_>>()
            .join(",")
    }
}
