//! Jaccard scoring of counted pairs.

use crate::index::UserItemIndex;
use crate::pairs::{ItemPair, PairCounts};

/// Jaccard similarity of one item pair's rater sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarityRecord {
    /// The scored pair.
    pub pair: ItemPair,
    /// Jaccard index of the two rater sets, in `[0, 1]`.
    pub jaccard: f64,
    /// Number of distinct users who rated both items.
    pub cooccurrences: u32,
}

/// Scores every counted pair against the per-item rater counts.
///
/// With `n12` co-occurrences and rater counts `n1` and `n2`, the Jaccard
/// index is `n12 / (n1 + n2 - n12)`, intersection over union of the two
/// rater sets. A pair whose union term is not positive cannot arise from a
/// real co-occurring user and is dropped rather than divided by.
pub fn score_pairs(counts: &PairCounts, index: &UserItemIndex) -> Vec<SimilarityRecord> {
    let mut records = Vec::with_capacity(counts.len());
    for (pair, n12) in counts.iter() {
        let n1 = index.rater_count(pair.first()) as u64;
        let n2 = index.rater_count(pair.second()) as u64;
        let union = match (n1 + n2).checked_sub(u64::from(n12)) {
            Some(u) if u > 0 => u,
            _ => continue,
        };
        records.push(SimilarityRecord {
            pair,
            jaccard: n12 as f64 / union as f64,
            cooccurrences: n12,
        });
    }
    records
}
