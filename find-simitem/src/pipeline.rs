//! The end-to-end similarity pipeline.

use crate::errors::{FindSimitemError, Result};
use crate::index::UserItemIndex;
use crate::pairs::PairCounts;
use crate::query::{similar_to, Neighbor, QueryParams};
use crate::ratings::RatingEvent;
use crate::scores::{score_pairs, SimilarityRecord};

/// Similarity pipeline from rating events to scored pairs.
///
/// Construct one per run, build the table once, then query any number of
/// target items against it.
#[derive(Debug, Default)]
pub struct SimilarityPipeline {
    index: UserItemIndex,
    records: Vec<SimilarityRecord>,
    shows_progress: bool,
}

impl SimilarityPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the progress via the standard error output?
    pub const fn shows_progress(mut self, yes: bool) -> Self {
        self.shows_progress = yes;
        self
    }

    /// Builds the similarity table from rating events, counting pairs on
    /// the calling thread.
    ///
    /// # Arguments
    ///
    /// * `events` - Rating events surviving ingestion (must not be empty).
    pub fn build_table<I>(self, events: I) -> Result<Self>
    where
        I: IntoIterator<Item = RatingEvent>,
    {
        self.build(events, false)
    }

    /// Builds the similarity table from rating events, counting pairs
    /// across threads with a final merge.
    ///
    /// Counting partial tables and merging them is order-independent, so
    /// the result is identical to [`SimilarityPipeline::build_table`].
    pub fn build_table_in_parallel<I>(self, events: I) -> Result<Self>
    where
        I: IntoIterator<Item = RatingEvent>,
    {
        self.build(events, true)
    }

    fn build<I>(mut self, events: I, parallel: bool) -> Result<Self>
    where
        I: IntoIterator<Item = RatingEvent>,
    {
        let index = UserItemIndex::from_events(events);
        if index.is_empty() {
            return Err(FindSimitemError::input(
                "There are no rating events to build a table from.",
            ));
        }
        let user_items = index.items_by_user();
        if self.shows_progress {
            eprintln!(
                "Indexed {} items across {} users",
                index.len(),
                user_items.len()
            );
        }
        let counts = if parallel {
            PairCounts::from_user_items_in_parallel(&user_items)
        } else {
            PairCounts::from_user_items(&user_items)
        };
        let records = score_pairs(&counts, &index);
        if self.shows_progress {
            eprintln!("Scored {} co-rated pairs", records.len());
        }
        self.index = index;
        self.records = records;
        Ok(self)
    }

    /// Ranks the most similar items to `target` under the query thresholds.
    pub fn similar_items(&self, target: u32, params: &QueryParams) -> Vec<Neighbor> {
        similar_to(&self.records, target, params)
    }

    /// Gets the scored records of every counted pair, in no particular
    /// order.
    pub fn records(&self) -> &[SimilarityRecord] {
        &self.records
    }

    /// Gets the number of distinct users who rated an item.
    pub fn rater_count(&self, item_id: u32) -> usize {
        self.index.rater_count(item_id)
    }

    /// Gets the number of scored pairs.
    pub fn num_pairs(&self) -> usize {
        self.records.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
