use crate::domain::entities::profile::UserRecord;
use crate::domain::error::DomainError;

/// Where user records come from. Failures must surface as
/// `DomainError::DataSource`; an empty result means there are no users.
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// Source name for logging
    fn name(&self) -> &str;
}
