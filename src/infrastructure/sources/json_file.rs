use super::parse_users;
use crate::domain::entities::profile::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::profile_source::ProfileSource;
use async_trait::async_trait;
use std::path::PathBuf;

/// A JSON export of the users node, read from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProfileSource for JsonFileSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::DataSource(format!("Cannot read {}: {e}", self.path.display()))
        })?;
        let payload: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            DomainError::DataSource(format!("Invalid JSON in {}: {e}", self.path.display()))
        })?;
        parse_users(payload)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
