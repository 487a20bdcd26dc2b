use crate::domain::entities::corpus::{Corpus, CorpusMember};
use crate::domain::entities::profile::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::TrainedModel;
use crate::domain::model::similarity::SimilarityMatrix;
use crate::domain::model::vectorizer::CountVectorizer;
use crate::domain::ports::artifact_store::ArtifactStore;
use crate::domain::ports::profile_source::ProfileSource;
use crate::domain::values::run_id::RunId;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub run_id: String,
    pub users_fetched: usize,
    pub alumni: usize,
    pub vocabulary_size: usize,
}

pub struct TrainUseCase {
    source: Arc<dyn ProfileSource>,
    store: Arc<dyn ArtifactStore>,
}

impl TrainUseCase {
    pub fn new(source: Arc<dyn ProfileSource>, store: Arc<dyn ArtifactStore>) -> Self {
        Self { source, store }
    }

    /// Fetch, fit, persist. Source errors are returned unchanged and leave
    /// the currently active model untouched.
    pub async fn execute(&self) -> Result<(TrainedModel, TrainingReport), DomainError> {
        let users = self.source.fetch_users().await?;
        tracing::info!(source = self.source.name(), users = users.len(), "fetched users");

        let model = build_model(&users)?;
        if model.is_empty() {
            tracing::warn!("no alumni found; saving empty model");
        }
        self.store.save(&model)?;

        let report = TrainingReport {
            run_id: model.run_id().to_string(),
            users_fetched: users.len(),
            alumni: model.run().corpus_size,
            vocabulary_size: model.run().vocabulary_size,
        };
        tracing::info!(
            run_id = %report.run_id,
            alumni = report.alumni,
            vocabulary = report.vocabulary_size,
            "training completed"
        );
        Ok((model, report))
    }
}

/// Alumni filter → feature composition → fit → corpus similarity.
pub fn build_model(users: &[UserRecord]) -> Result<TrainedModel, DomainError> {
    let run_id = RunId::generate();
    let members: Vec<CorpusMember> = users
        .iter()
        .filter(|u| u.user_type.is_alumni())
        .map(CorpusMember::from)
        .collect();
    let corpus = Corpus::new(run_id.clone(), members);

    let (vocabulary, features) = CountVectorizer::english().fit(run_id, &corpus.feature_texts());
    let similarity = SimilarityMatrix::from_features(&features);

    TrainedModel::from_parts(Utc::now(), vocabulary, features, similarity, corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::profile::ProfileFeatures;
    use crate::domain::values::user_type::UserType;

    #[test]
    fn test_build_model_keeps_only_alumni() {
        let mut student = UserRecord::alumni("s1", "Sam", ProfileFeatures::new(Some("rust"), None, None));
        student.user_type = UserType::Student;
        let users = vec![
            UserRecord::alumni("a1", "Ada", ProfileFeatures::new(Some("python"), None, Some("UK"))),
            student,
        ];
        let model = build_model(&users).unwrap();
        assert_eq!(model.corpus().len(), 1);
        assert_eq!(model.corpus().members[0].features, "python UK");
        assert_eq!(model.corpus().members[0].location, "UK");
        assert_eq!(model.vocabulary().terms(), &["python", "uk"]);
    }

    #[test]
    fn test_build_model_without_alumni_is_empty() {
        let model = build_model(&[]).unwrap();
        assert!(model.is_empty());
        assert!(model.vocabulary().is_empty());
    }
}
