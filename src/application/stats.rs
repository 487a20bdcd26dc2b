use crate::domain::error::DomainError;
use crate::domain::model::artifacts::{ModelRun, TrainedModel};
use crate::domain::ports::artifact_store::ArtifactStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub run: ModelRun,
    pub feature_entries: usize,
    pub zero_vector_members: usize,
}

impl ModelStats {
    pub fn of(model: &TrainedModel) -> Self {
        Self {
            run: model.run().clone(),
            feature_entries: model.features().nnz(),
            zero_vector_members: model.features().rows.iter().filter(|r| r.is_zero()).count(),
        }
    }
}

pub struct StatsUseCase {
    store: Arc<dyn ArtifactStore>,
}

impl StatsUseCase {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn runs(&self) -> Result<Vec<ModelRun>, DomainError> {
        self.store.runs()
    }
}
