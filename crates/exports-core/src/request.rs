//! Structured export request schema
//!
//! The request mirrors the automation-facing interface: one action, one
//! path, one or more client specifiers, and the option fields with their
//! documented defaults. Requests are validated once at the boundary.

use serde::{Deserialize, Deserializer, Serialize};

use exports_model::{DEFAULT_SECURITY, OptionSet};

use crate::error::{Error, Result};

/// Security flavors the request may negotiate
pub const SECURITY_FLAVORS: &[&str] = &["sys", "krb5", "krb5i", "krb5p"];

/// Requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Remove,
}

/// One structured request against the exports file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Free text, echoed back in the outcome
    pub name: String,
    pub action: Action,
    /// Trigger the export-table reload when the file changed
    #[serde(default = "default_true")]
    pub update: bool,
    /// Discard all existing export directives before applying the action
    #[serde(default)]
    pub clear_all: bool,
    /// Absolute path to export; must exist on the host
    pub path: String,
    /// One or more client specifiers; a plain string is accepted too
    #[serde(deserialize_with = "one_or_many")]
    pub clients: Vec<String>,
    #[serde(default = "default_true")]
    pub read_only: bool,
    #[serde(default = "default_true")]
    pub root_squash: bool,
    #[serde(default)]
    pub all_squash: bool,
    /// Colon-delimited security flavor list
    #[serde(default = "default_security")]
    pub security: String,
    /// Free-form extra option tokens, comma or space delimited
    #[serde(default)]
    pub options: String,
}

fn default_true() -> bool {
    true
}

fn default_security() -> String {
    DEFAULT_SECURITY.to_string()
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(client) => vec![client],
        OneOrMany::Many(clients) => clients,
    })
}

impl ExportRequest {
    /// Validate the request fields. Terminal on failure: nothing is
    /// mutated for an invalid request.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::validation("path", "required"));
        }
        if !self.path.starts_with('/') {
            return Err(Error::validation(
                "path",
                format!("{:?} is not absolute", self.path),
            ));
        }
        if self.clients.is_empty() {
            return Err(Error::validation("clients", "at least one client required"));
        }
        if self.clients.iter().any(|c| c.trim().is_empty()) {
            return Err(Error::validation("clients", "client specifier is empty"));
        }
        if !self.security.is_empty() {
            for flavor in self.security.split(':') {
                if !SECURITY_FLAVORS.contains(&flavor) {
                    return Err(Error::validation(
                        "security",
                        format!("unknown security flavor {flavor:?}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// The option set an `add` request asks for
    pub fn compose_options(&self) -> Result<OptionSet> {
        Ok(OptionSet::compose(
            self.read_only,
            self.root_squash,
            self.all_squash,
            &self.security,
            &self.options,
        )?)
    }
}
