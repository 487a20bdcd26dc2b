pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::recommend::RecommendUseCase;
use crate::application::similar::SimilarUseCase;
use crate::application::stats::{ModelStats, StatsUseCase};
use crate::application::train::{TrainUseCase, TrainingReport};
use crate::domain::entities::profile::ProfileFeatures;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::{ModelRun, TrainedModel};
use crate::domain::ports::artifact_store::ArtifactStore;
use crate::domain::ports::profile_source::ProfileSource;
use crate::infrastructure::config::Settings;
use crate::infrastructure::sqlite::artifact_store::SqliteArtifactStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::{Arc, RwLock};

pub struct AlumniMatch {
    train_uc: TrainUseCase,
    stats_uc: StatsUseCase,
    store: Arc<dyn ArtifactStore>,
    /// Published only after a full load or training run; readers clone the Arc.
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl AlumniMatch {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        Self::with_providers(&settings.db_path, settings.profile_source())
    }

    pub fn with_providers(db_path: &str, source: Arc<dyn ProfileSource>) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Storage(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Storage(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let store: Arc<dyn ArtifactStore> = Arc::new(SqliteArtifactStore::new(conn));
        Self::with_store(store, source)
    }

    /// A stored model that fails to load is logged and skipped, so `train`
    /// stays reachable to replace it.
    pub fn with_store(store: Arc<dyn ArtifactStore>, source: Arc<dyn ProfileSource>) -> Result<Self, DomainError> {
        let model = match store.load() {
            Ok(model) => model.map(Arc::new),
            Err(e) => {
                tracing::error!(error = %e, "stored model failed to load; starting without a model");
                None
            }
        };
        match &model {
            Some(m) => tracing::info!(run_id = %m.run_id(), alumni = m.corpus().len(), "model loaded"),
            None => tracing::warn!("no trained model found; recommendations unavailable until `train` runs"),
        }

        Ok(Self {
            train_uc: TrainUseCase::new(source, store.clone()),
            stats_uc: StatsUseCase::new(store.clone()),
            store,
            model: RwLock::new(model),
        })
    }

    /// Current model snapshot, if any.
    pub fn model(&self) -> Option<Arc<TrainedModel>> {
        self.model.read().ok().and_then(|m| m.clone())
    }

    fn publish(&self, model: Option<TrainedModel>) -> Result<(), DomainError> {
        let mut slot = self
            .model
            .write()
            .map_err(|e| DomainError::Storage(format!("model lock poisoned: {e}")))?;
        *slot = model.map(Arc::new);
        Ok(())
    }

    pub async fn train(&self) -> Result<TrainingReport, DomainError> {
        let (model, report) = self.train_uc.execute().await?;
        self.publish(Some(model))?;
        Ok(report)
    }

    /// Re-reads the active run from the store.
    pub fn reload(&self) -> Result<(), DomainError> {
        self.publish(self.store.load()?)
    }

    pub fn recommend(&self, query: &ProfileFeatures, top_n: usize) -> Result<Vec<Recommendation>, DomainError> {
        RecommendUseCase::new(self.model()).execute(query, top_n)
    }

    pub fn similar(&self, user_id: &str, top_n: usize) -> Result<Vec<Recommendation>, DomainError> {
        SimilarUseCase::new(self.model()).similar_to(user_id, top_n)
    }

    pub fn stats(&self) -> Result<ModelStats, DomainError> {
        self.model()
            .map(|m| ModelStats::of(&m))
            .ok_or_else(|| DomainError::ModelUnavailable("no trained model loaded".into()))
    }

    pub fn runs(&self) -> Result<Vec<ModelRun>, DomainError> {
        self.stats_uc.runs()
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }
}
