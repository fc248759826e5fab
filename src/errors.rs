use crate::domain::IdmQuery;

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum IdmError {
    // Service answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // Connection, TLS or IO failures
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // Unexpected response shape
    #[error("Decode error: {0}")]
    Decode(String),

    // Record construction without its mandatory field
    #[error("Missing mandatory field: {0}")]
    MissingField(&'static str),

    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Query {query} is not supported by {operation}")]
    UnsupportedQuery {
        operation: &'static str,
        query: IdmQuery,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IdmError {
    /// HTTP status carried by the error, if the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            IdmError::Http { status, .. } => Some(*status),
            IdmError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, IdmError::NotImplemented(_))
    }
}

impl From<serde_json::Error> for IdmError {
    fn from(err: serde_json::Error) -> Self {
        IdmError::Decode(err.to_string())
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, IdmError>;
