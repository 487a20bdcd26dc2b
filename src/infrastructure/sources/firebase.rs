use super::parse_users;
use crate::domain::entities::profile::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::profile_source::ProfileSource;
use async_trait::async_trait;
use std::time::Duration;

/// Reads the `users` node of a Firebase Realtime Database over its REST API.
pub struct FirebaseSource {
    /// Database root, e.g. `https://<project>.firebaseio.com`
    database_url: String,
    /// Database secret or ID token, sent as the `auth` query parameter
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl FirebaseSource {
    pub fn new(database_url: String, auth_token: Option<String>) -> Self {
        Self {
            database_url: database_url.trim_end_matches('/').to_string(),
            auth_token,
            client: reqwest::Client::builder()
                .user_agent("alumni-match/0.1")
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users.json", self.database_url)
    }
}

#[async_trait]
impl ProfileSource for FirebaseSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        let mut req = self.client.get(self.users_url());
        if let Some(token) = &self.auth_token {
            req = req.query(&[("auth", token)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::DataSource(format!("Firebase request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::DataSource(format!("Firebase returned {status}: {body}")));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DomainError::DataSource(format!("Firebase response is not JSON: {e}")))?;
        parse_users(payload)
    }

    fn name(&self) -> &str {
        "firebase"
    }
}
