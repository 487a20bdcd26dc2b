use crate::domain::entities::corpus::Corpus;
use crate::domain::error::DomainError;
use crate::domain::model::similarity::SimilarityMatrix;
use crate::domain::model::vectorizer::{FeatureMatrix, Vocabulary};
use crate::domain::values::run_id::RunId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRun {
    pub run_id: RunId,
    pub trained_at: DateTime<Utc>,
    pub corpus_size: usize,
    pub vocabulary_size: usize,
}

/// Everything one training run produced. Can only be built from artifacts
/// that share a run id and agree on shape.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    run: ModelRun,
    vocabulary: Vocabulary,
    features: FeatureMatrix,
    similarity: SimilarityMatrix,
    corpus: Corpus,
}

impl TrainedModel {
    pub fn from_parts(
        trained_at: DateTime<Utc>,
        vocabulary: Vocabulary,
        features: FeatureMatrix,
        similarity: SimilarityMatrix,
        corpus: Corpus,
    ) -> Result<Self, DomainError> {
        let run_id = vocabulary.run_id().clone();
        for (name, other) in [
            ("feature matrix", &features.run_id),
            ("similarity matrix", &similarity.run_id),
            ("corpus", &corpus.run_id),
        ] {
            if *other != run_id {
                return Err(DomainError::ArtifactMismatch(format!(
                    "{name} belongs to run {other}, vocabulary to run {run_id}"
                )));
            }
        }

        if features.n_cols != vocabulary.len() {
            return Err(DomainError::ArtifactMismatch(format!(
                "feature matrix has {} columns, vocabulary has {} terms",
                features.n_cols,
                vocabulary.len()
            )));
        }
        if let Some(col) = features.rows.iter().filter_map(|r| r.max_column()).max() {
            if col as usize >= vocabulary.len() {
                return Err(DomainError::ArtifactMismatch(format!(
                    "feature column {col} outside vocabulary of {} terms",
                    vocabulary.len()
                )));
            }
        }
        if features.n_rows() != corpus.len() {
            return Err(DomainError::ArtifactMismatch(format!(
                "feature matrix has {} rows, corpus has {} members",
                features.n_rows(),
                corpus.len()
            )));
        }
        if similarity.n != corpus.len() || similarity.values.len() != similarity.n * similarity.n {
            return Err(DomainError::ArtifactMismatch(format!(
                "similarity matrix is not {n}x{n}",
                n = corpus.len()
            )));
        }

        Ok(Self {
            run: ModelRun {
                run_id,
                trained_at,
                corpus_size: corpus.len(),
                vocabulary_size: vocabulary.len(),
            },
            vocabulary,
            features,
            similarity,
            corpus,
        })
    }

    pub fn run(&self) -> &ModelRun {
        &self.run
    }

    pub fn run_id(&self) -> &RunId {
        &self.run.run_id
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::corpus::CorpusMember;
    use crate::domain::model::vectorizer::CountVectorizer;

    fn member(id: &str, features: &str) -> CorpusMember {
        CorpusMember {
            user_id: id.into(),
            full_name: id.into(),
            email: String::new(),
            company: String::new(),
            location: String::new(),
            features: features.into(),
        }
    }

    fn parts(run: &str, texts: &[&str]) -> (Vocabulary, FeatureMatrix, SimilarityMatrix, Corpus) {
        let run_id = RunId::from(run);
        let corpus = Corpus::new(
            run_id.clone(),
            texts.iter().enumerate().map(|(i, t)| member(&i.to_string(), t)).collect(),
        );
        let (vocab, features) = CountVectorizer::english().fit(run_id, &corpus.feature_texts());
        let sim = SimilarityMatrix::from_features(&features);
        (vocab, features, sim, corpus)
    }

    #[test]
    fn test_consistent_parts_assemble() {
        let (v, f, s, c) = parts("a", &["python", "java"]);
        let model = TrainedModel::from_parts(Utc::now(), v, f, s, c).unwrap();
        assert_eq!(model.run().corpus_size, 2);
        assert_eq!(model.run().vocabulary_size, 2);
        assert_eq!(model.run_id().as_str(), "a");
    }

    #[test]
    fn test_mixed_runs_rejected() {
        let (va, _, sa, ca) = parts("a", &["python", "java"]);
        let (_, fb, _, _) = parts("b", &["python", "java"]);
        let err = TrainedModel::from_parts(Utc::now(), va, fb, sa, ca).unwrap_err();
        assert!(matches!(err, DomainError::ArtifactMismatch(_)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let (v, mut f, s, c) = parts("a", &["python", "java"]);
        f.rows.pop();
        let err = TrainedModel::from_parts(Utc::now(), v, f, s, c).unwrap_err();
        assert!(err.to_string().contains("rows"));
    }

    #[test]
    fn test_empty_model_is_valid() {
        let (v, f, s, c) = parts("a", &[]);
        let model = TrainedModel::from_parts(Utc::now(), v, f, s, c).unwrap();
        assert!(model.is_empty());
    }
}
