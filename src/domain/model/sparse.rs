use serde::{Deserialize, Serialize};

/// Token counts keyed by vocabulary column, sorted by column, zeros omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, u32)>,
}

impl SparseVector {
    /// Builds from arbitrary (column, count) pairs; duplicates are summed.
    pub fn from_counts(mut pairs: Vec<(u32, u32)>) -> Self {
        pairs.sort_unstable_by_key(|(col, _)| *col);
        let mut entries: Vec<(u32, u32)> = Vec::with_capacity(pairs.len());
        for (col, count) in pairs {
            if count == 0 {
                continue;
            }
            match entries.last_mut() {
                Some((last, total)) if *last == col => *total += count,
                _ => entries.push((col, count)),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_column(&self) -> Option<u32> {
        self.entries.last().map(|(col, _)| *col)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0_f64;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, va) = self.entries[i];
            let (cb, vb) = other.entries[j];
            match ca.cmp(&cb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += va as f64 * vb as f64;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| (*v as f64) * (*v as f64)).sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.entries
            .iter()
            .flat_map(|(col, count)| col.to_le_bytes().into_iter().chain(count.to_le_bytes()))
            .collect()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let pairs = bytes
            .chunks_exact(8)
            .map(|c| {
                (
                    u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    u32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                )
            })
            .collect();
        Self::from_counts(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts_merges_and_sorts() {
        let v = SparseVector::from_counts(vec![(3, 1), (1, 2), (3, 2), (2, 0)]);
        assert_eq!(v.entries(), &[(1, 2), (3, 3)]);
        assert_eq!(v.max_column(), Some(3));
    }

    #[test]
    fn test_dot_and_norm() {
        let a = SparseVector::from_counts(vec![(0, 1), (2, 2)]);
        let b = SparseVector::from_counts(vec![(1, 5), (2, 3)]);
        assert_eq!(a.dot(&b), 6.0);
        assert_eq!(a.squared_norm(), 5.0);
        assert_eq!(SparseVector::default().squared_norm(), 0.0);
    }

    #[test]
    fn test_blob_layout_is_little_endian_pairs() {
        let v = SparseVector::from_counts(vec![(1, 2)]);
        assert_eq!(v.to_bytes(), vec![1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(SparseVector::from_bytes(&v.to_bytes()), v);
    }
}
