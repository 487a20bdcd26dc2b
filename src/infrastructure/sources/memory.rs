use crate::domain::entities::profile::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::profile_source::ProfileSource;
use async_trait::async_trait;
use std::sync::Mutex;

/// Serves a fixed list of users. The list can be swapped between runs.
#[derive(Default)]
pub struct StaticSource {
    users: Mutex<Vec<UserRecord>>,
}

impl StaticSource {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn replace(&self, users: Vec<UserRecord>) {
        if let Ok(mut guard) = self.users.lock() {
            *guard = users;
        }
    }
}

#[async_trait]
impl ProfileSource for StaticSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.users
            .lock()
            .map(|u| u.clone())
            .map_err(|e| DomainError::DataSource(e.to_string()))
    }

    fn name(&self) -> &str {
        "static"
    }
}
