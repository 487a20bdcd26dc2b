use crate::domain::entities::profile::ProfileFeatures;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::TrainedModel;
use crate::domain::model::similarity::cosine_similarity;
use std::sync::Arc;

pub const DEFAULT_TOP_N: usize = 3;

/// Ranks corpus members against a query profile using a frozen model snapshot.
pub struct RecommendUseCase {
    model: Option<Arc<TrainedModel>>,
}

impl RecommendUseCase {
    pub fn new(model: Option<Arc<TrainedModel>>) -> Self {
        Self { model }
    }

    pub fn execute(&self, query: &ProfileFeatures, top_n: usize) -> Result<Vec<Recommendation>, DomainError> {
        if query.is_blank() {
            return Err(DomainError::InvalidQuery(
                "at least one of skills, language, location is required".into(),
            ));
        }
        let model = usable_model(self.model.as_deref())?;

        let query_vector = model.vocabulary().transform_one(&query.compose());
        let scores = cosine_similarity(&[query_vector], &model.features().rows)
            .pop()
            .unwrap_or_default();

        let ranked = rank(&scores, top_n, None);
        tracing::debug!(
            run_id = %model.run_id(),
            candidates = scores.len(),
            returned = ranked.len(),
            "ranked query"
        );

        Ok(ranked
            .into_iter()
            .filter_map(|(idx, sim)| model.corpus().get(idx).map(|m| Recommendation::new(m, sim)))
            .collect())
    }
}

/// The model if one is loaded and has candidates to offer.
pub(crate) fn usable_model(model: Option<&TrainedModel>) -> Result<&TrainedModel, DomainError> {
    match model {
        None => Err(DomainError::ModelUnavailable("no trained model loaded".into())),
        Some(m) if m.is_empty() => Err(DomainError::ModelUnavailable(format!(
            "model {} has an empty corpus",
            m.run_id()
        ))),
        Some(m) => Ok(m),
    }
}

/// Indices of the `top_n` highest scores, descending, ties by lower index.
pub(crate) fn rank(scores: &[f64], top_n: usize, exclude: Option<usize>) -> Vec<(usize, f64)> {
    let mut indexed: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| Some(*i) != exclude)
        .collect();
    // stable: equal scores keep ascending index order
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(top_n);
    indexed
}
