use crate::application::recommend::{rank, usable_model};
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::TrainedModel;
use std::sync::Arc;

/// Alumni most similar to a given alumnus, read from the precomputed
/// corpus similarity matrix.
pub struct SimilarUseCase {
    model: Option<Arc<TrainedModel>>,
}

impl SimilarUseCase {
    pub fn new(model: Option<Arc<TrainedModel>>) -> Self {
        Self { model }
    }

    pub fn similar_to(&self, user_id: &str, top_n: usize) -> Result<Vec<Recommendation>, DomainError> {
        let model = usable_model(self.model.as_deref())?;
        let idx = model
            .corpus()
            .position(user_id)
            .ok_or_else(|| DomainError::NotFound(format!("Alumnus not in corpus: {user_id}")))?;
        let row = model.similarity().row(idx).ok_or_else(|| {
            DomainError::ArtifactMismatch(format!("similarity matrix has no row {idx}"))
        })?;

        Ok(rank(row, top_n, Some(idx))
            .into_iter()
            .filter_map(|(i, sim)| model.corpus().get(i).map(|m| Recommendation::new(m, sim)))
            .collect())
    }
}
