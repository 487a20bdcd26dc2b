use crate::domain::entities::profile::UserRecord;
use crate::domain::values::run_id::RunId;
use serde::{Deserialize, Serialize};

/// An alumnus as stored in the corpus: display fields plus composed features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMember {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub location: String,
    pub features: String,
}

impl From<&UserRecord> for CorpusMember {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            company: user.company.clone(),
            location: user.features.location.clone().unwrap_or_default(),
            features: user.features.compose(),
        }
    }
}

/// Ordered candidate set of one training run. Position is identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub run_id: RunId,
    pub members: Vec<CorpusMember>,
}

impl Corpus {
    pub fn new(run_id: RunId, members: Vec<CorpusMember>) -> Self {
        Self { run_id, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CorpusMember> {
        self.members.get(index)
    }

    pub fn position(&self, user_id: &str) -> Option<usize> {
        self.members.iter().position(|m| m.user_id == user_id)
    }

    pub fn feature_texts(&self) -> Vec<String> {
        self.members.iter().map(|m| m.features.clone()).collect()
    }
}
