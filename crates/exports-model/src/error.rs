//! Error types for exports-model

/// Result type for exports-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or building export rules
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line_no}: cannot parse export directive {line:?}: {message}")]
    Parse {
        line_no: usize,
        line: String,
        message: String,
    },

    #[error("invalid export option {token:?}: {message}")]
    InvalidOption { token: String, message: String },
}

impl Error {
    pub fn parse(line_no: usize, line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            line_no,
            line: line.into(),
            message: message.into(),
        }
    }

    pub fn invalid_option(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            token: token.into(),
            message: message.into(),
        }
    }
}
