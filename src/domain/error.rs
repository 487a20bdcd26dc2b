use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Data source failure: {0}")]
    DataSource(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Artifact mismatch: {0}")]
    ArtifactMismatch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Errors caused by the caller's input rather than by the service state.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::InvalidQuery(_) | DomainError::NotFound(_))
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}
