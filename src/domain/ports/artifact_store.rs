use crate::domain::entities::corpus::Corpus;
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::{ModelRun, TrainedModel};
use crate::domain::model::similarity::SimilarityMatrix;
use crate::domain::model::vectorizer::{FeatureMatrix, Vocabulary};
use crate::domain::values::run_id::RunId;

/// Persistence for trained models.
///
/// `save` stores every artifact of a run and makes it the active run in one
/// step; `load` returns the active run or `None` if nothing was trained yet.
/// Only the newest runs keep their artifacts; older ones stay listed in
/// `runs` but their per-artifact loaders return `None`. The per-artifact
/// loaders exist for inspection and always return the artifact stamped with
/// the run it belongs to.
pub trait ArtifactStore: Send + Sync {
    fn save(&self, model: &TrainedModel) -> Result<(), DomainError>;
    fn load(&self) -> Result<Option<TrainedModel>, DomainError>;
    fn active_run(&self) -> Result<Option<RunId>, DomainError>;
    fn runs(&self) -> Result<Vec<ModelRun>, DomainError>;

    fn load_vocabulary(&self, run_id: &RunId) -> Result<Option<Vocabulary>, DomainError>;
    fn load_feature_matrix(&self, run_id: &RunId) -> Result<Option<FeatureMatrix>, DomainError>;
    fn load_similarity(&self, run_id: &RunId) -> Result<Option<SimilarityMatrix>, DomainError>;
    fn load_corpus(&self, run_id: &RunId) -> Result<Option<Corpus>, DomainError>;
}
