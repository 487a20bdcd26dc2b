//! Bag-of-words vectorization over a vocabulary learned from the corpus.
//!
//! `CountVectorizer` is the only way to learn a vocabulary and is consumed by
//! `fit`. The resulting `Vocabulary` is frozen: it can transform text into
//! count vectors but can never be refitted, so corpus and query vectors always
//! share the same columns.

use crate::domain::model::sparse::SparseVector;
use crate::domain::model::tokenizer::tokenize;
use crate::domain::values::run_id::RunId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct CountVectorizer {
    _private: (),
}

impl CountVectorizer {
    /// Lowercasing, 2+ character word tokens, English stop words removed.
    pub fn english() -> Self {
        Self::default()
    }

    /// Learns the vocabulary from `docs` and returns it together with the
    /// count matrix of those same documents. Columns follow lexical token order.
    pub fn fit(self, run_id: RunId, docs: &[String]) -> (Vocabulary, FeatureMatrix) {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d)).collect();
        let distinct: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let terms: Vec<String> = distinct.into_iter().map(String::from).collect();

        let vocabulary = Vocabulary::from_terms(run_id.clone(), terms);
        let rows = tokenized.iter().map(|tokens| vocabulary.count(tokens)).collect();
        let matrix = FeatureMatrix::new(run_id, vocabulary.len(), rows);
        (vocabulary, matrix)
    }
}

/// Frozen token → column mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    run_id: RunId,
    terms: Vec<String>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Rebuilds a vocabulary from its terms in column order.
    pub fn from_terms(run_id: RunId, terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self { run_id, terms, index }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Out-of-vocabulary tokens contribute nothing.
    pub fn transform(&self, texts: &[String]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.count(&tokenize(t))).collect()
    }

    pub fn transform_one(&self, text: &str) -> SparseVector {
        self.count(&tokenize(text))
    }

    fn count(&self, tokens: &[String]) -> SparseVector {
        SparseVector::from_counts(
            tokens
                .iter()
                .filter_map(|t| self.column(t))
                .map(|col| (col, 1))
                .collect(),
        )
    }
}

/// One count vector per corpus member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub run_id: RunId,
    pub n_cols: usize,
    pub rows: Vec<SparseVector>,
}

impl FeatureMatrix {
    pub fn new(run_id: RunId, n_cols: usize, rows: Vec<SparseVector>) -> Self {
        Self { run_id, n_cols, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }
}
