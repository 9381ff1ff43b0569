//! Error types for exports-core

/// Result type for exports-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling export requests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from exports-model (parsing, option handling)
    #[error(transparent)]
    Model(#[from] exports_model::Error),

    /// Error from exports-fs (I/O, locking, reload)
    #[error(transparent)]
    Fs(#[from] exports_fs::Error),

    /// A request field is missing or invalid
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Internal invariant breach: two entries ended up sharing a
    /// (path, client) pair. Never expected under correct use.
    #[error("duplicate export entry for {path} {client}")]
    DuplicateEntry { path: String, client: String },
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
