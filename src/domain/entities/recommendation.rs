use crate::domain::entities::corpus::CorpusMember;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub company: String,
    pub location: String,
    /// Cosine similarity as a percentage, two decimals.
    pub similarity_score: f64,
}

impl Recommendation {
    pub fn new(member: &CorpusMember, similarity: f64) -> Self {
        Self {
            name: member.full_name.clone(),
            company: member.company.clone(),
            location: member.location.clone(),
            similarity_score: percentage(similarity),
        }
    }
}

/// `round(similarity * 100, 2)`
pub fn percentage(similarity: f64) -> f64 {
    (similarity * 10_000.0).round() / 100.0
}
