use thiserror::Error;

/// Result type returned by every domain operation.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure kinds a domain operation can report.
///
/// The HTTP layer maps each kind to a status code exactly once; domain code
/// never deals in status codes.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request passed deserialization but violates a field rule.
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The chat-completion provider failed or timed out.
    #[error("Chat provider error: {0:#}")]
    Provider(anyhow::Error),

    /// The store could not be read or written.
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl ServiceError {
    /// Whether this failure originates downstream rather than with the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Provider(_) | ServiceError::Storage(_))
    }
}
