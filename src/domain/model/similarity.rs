use crate::domain::model::sparse::SparseVector;
use crate::domain::model::vectorizer::FeatureMatrix;
use crate::domain::values::run_id::RunId;
use serde::{Deserialize, Serialize};

/// Cosine similarity of two count vectors; 0.0 when either is all zeros.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom_sq = a.squared_norm() * b.squared_norm();
    if denom_sq == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom_sq.sqrt()
}

/// Every row of `a` against every row of `b`: an `a.len() × b.len()` matrix.
pub fn cosine_similarity(a: &[SparseVector], b: &[SparseVector]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|u| b.iter().map(|v| cosine(u, v)).collect())
        .collect()
}

/// Dense corpus × corpus similarity, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    pub run_id: RunId,
    pub n: usize,
    pub values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn from_features(features: &FeatureMatrix) -> Self {
        let values = cosine_similarity(&features.rows, &features.rows)
            .into_iter()
            .flatten()
            .collect();
        Self {
            run_id: features.run_id.clone(),
            n: features.n_rows(),
            values,
        }
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.n {
            return None;
        }
        Some(&self.values[i * self.n..(i + 1) * self.n])
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.row(i).and_then(|r| r.get(j).copied())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    pub fn from_bytes(run_id: RunId, n: usize, bytes: &[u8]) -> Self {
        let values = bytes
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect();
        Self { run_id, n, values }
    }
}
