use crate::application::recommend::DEFAULT_TOP_N;
use crate::domain::error::DomainError;
use crate::domain::ports::profile_source::ProfileSource;
use crate::infrastructure::sources::firebase::FirebaseSource;
use crate::infrastructure::sources::json_file::JsonFileSource;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Firebase { database_url: String, auth_token: Option<String> },
    File { path: String },
}

/// Runtime settings, read from `ALUMNI_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: String,
    pub source: SourceConfig,
    pub top_n: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let db_path = get("ALUMNI_DB").unwrap_or_else(|| "./alumni.db".into());

        let source = match get("ALUMNI_SOURCE").as_deref().unwrap_or("file") {
            "firebase" => SourceConfig::Firebase {
                database_url: get("ALUMNI_FIREBASE_URL").ok_or_else(|| {
                    DomainError::Parse("ALUMNI_FIREBASE_URL is required for the firebase source".into())
                })?,
                auth_token: get("ALUMNI_FIREBASE_TOKEN").filter(|t| !t.is_empty()),
            },
            "file" => SourceConfig::File {
                path: get("ALUMNI_USERS_FILE").unwrap_or_else(|| "./users.json".into()),
            },
            other => {
                return Err(DomainError::Parse(format!(
                    "Unknown ALUMNI_SOURCE '{other}'. Use 'firebase' or 'file'"
                )))
            }
        };

        let top_n = match get("ALUMNI_TOP_N") {
            None => DEFAULT_TOP_N,
            Some(raw) => raw
                .parse()
                .map_err(|e| DomainError::Parse(format!("ALUMNI_TOP_N '{raw}': {e}")))?,
        };

        Ok(Self { db_path, source, top_n })
    }

    pub fn profile_source(&self) -> Arc<dyn ProfileSource> {
        match &self.source {
            SourceConfig::Firebase { database_url, auth_token } => {
                Arc::new(FirebaseSource::new(database_url.clone(), auth_token.clone()))
            }
            SourceConfig::File { path } => Arc::new(JsonFileSource::new(path.clone())),
        }
    }
}
