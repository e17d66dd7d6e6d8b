//! Filtering and ranking of scored pairs for one target item.

use crate::scores::SimilarityRecord;

/// Thresholds and result limit for the ranking stage.
#[derive(Clone, Copy, Debug)]
pub struct QueryParams {
    /// Minimum Jaccard index; a record must score strictly above it.
    pub score_threshold: f64,
    /// Minimum co-occurrence count; a record must count strictly above it.
    pub cooccurrence_threshold: u32,
    /// Maximum number of neighbors returned.
    pub top_k: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.3,
            cooccurrence_threshold: 10,
            top_k: 10,
        }
    }
}

/// A ranked similar item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Id of the similar item.
    pub item_id: u32,
    /// Jaccard index against the queried item.
    pub jaccard: f64,
    /// Number of distinct users who rated both items.
    pub cooccurrences: u32,
}

/// Ranks the records touching `target` that pass both thresholds.
///
/// Both thresholds are exclusive: a record scoring or counting exactly at
/// a threshold is excluded. Results are ordered descending by Jaccard
/// index; ties break by descending co-occurrence count, then ascending
/// item id, so the ranking is deterministic.
pub fn similar_to(
    records: &[SimilarityRecord],
    target: u32,
    params: &QueryParams,
) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = records
        .iter()
        .filter(|r| {
            r.jaccard > params.score_threshold && r.cooccurrences > params.cooccurrence_threshold
        })
        .filter_map(|r| {
            r.pair.other(target).map(|item_id| Neighbor {
                item_id,
                jaccard: r.jaccard,
                cooccurrences: r.cooccurrences,
            })
        })
        .collect();
    neighbors.sort_unstable_by(|x, y| {
        y.jaccard
            .total_cmp(&x.jaccard)
            .then_with(|| y.cooccurrences.cmp(&x.cooccurrences))
            .then_with(|| x.item_id.cmp(&y.item_id))
    });
    neighbors.truncate(params.top_k);
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::ItemPair;

    fn record(a: u32, b: u32, jaccard: f64, cooccurrences: u32) -> SimilarityRecord {
        SimilarityRecord {
            pair: ItemPair::new(a, b),
            jaccard,
            cooccurrences,
        }
    }

    #[test]
    fn test_only_pairs_touching_the_target_survive() {
        let records = vec![
            record(1, 2, 0.9, 100),
            record(2, 3, 0.8, 100),
            record(1, 4, 0.7, 100),
        ];
        let neighbors = similar_to(&records, 1, &QueryParams::default());
        assert_eq!(
            neighbors.iter().map(|n| n.item_id).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let params = QueryParams {
            score_threshold: 0.3,
            cooccurrence_threshold: 10,
            top_k: 10,
        };
        let records = vec![
            record(1, 2, 0.3, 100),  // at the score threshold
            record(1, 3, 0.31, 10),  // at the co-occurrence threshold
            record(1, 4, 0.31, 11),  // above both
        ];
        let neighbors = similar_to(&records, 1, &params);
        assert_eq!(
            neighbors.iter().map(|n| n.item_id).collect::<Vec<_>>(),
            vec![4]
        );
    }

    #[test]
    fn test_ranking_and_tie_breaks() {
        let records = vec![
            record(1, 5, 0.5, 20),
            record(1, 2, 0.8, 15),
            record(1, 4, 0.5, 30),
            record(1, 6, 0.5, 20),
        ];
        let neighbors = similar_to(&records, 1, &QueryParams::default());
        // Descending score, then descending strength, then ascending id.
        assert_eq!(
            neighbors.iter().map(|n| n.item_id).collect::<Vec<_>>(),
            vec![2, 4, 5, 6]
        );
    }

    #[test]
    fn test_top_k_truncation() {
        let records: Vec<_> = (2..20).map(|b| record(1, b, 0.9, 100)).collect();
        let params = QueryParams {
            top_k: 3,
            ..QueryParams::default()
        };
        let neighbors = similar_to(&records, 1, &params);
        assert_eq!(neighbors.len(), 3);
        assert_eq!(
            neighbors.iter().map(|n| n.item_id).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let records = vec![record(2, 3, 0.9, 100)];
        assert!(similar_to(&records, 1, &QueryParams::default()).is_empty());
    }
}
