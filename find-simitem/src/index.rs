//! Per-item sets of distinct raters.

use hashbrown::{HashMap, HashSet};

use crate::ratings::RatingEvent;

/// Mapping from item ids to the set of distinct users who rated them.
///
/// Duplicate ratings by one user for one item collapse to a single set
/// member, so a repeated rating can never inflate a downstream
/// co-occurrence count.
#[derive(Clone, Debug, Default)]
pub struct UserItemIndex {
    raters: HashMap<u32, HashSet<u32>>,
}

impl UserItemIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds rating events into per-item rater sets.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = RatingEvent>,
    {
        let mut index = Self::new();
        for event in events {
            index.add(event);
        }
        index
    }

    /// Records that a user rated an item.
    pub fn add(&mut self, event: RatingEvent) {
        self.raters
            .entry(event.item_id)
            .or_default()
            .insert(event.user_id);
    }

    /// Unions another partial index into this one.
    ///
    /// Set union is commutative and associative, so partial indexes built
    /// from any partitioning of the event stream merge to the same result.
    pub fn merge(&mut self, other: Self) {
        for (item_id, users) in other.raters {
            self.raters.entry(item_id).or_default().extend(users);
        }
    }

    /// Gets the number of distinct users who rated an item.
    pub fn rater_count(&self, item_id: u32) -> usize {
        self.raters.get(&item_id).map_or(0, HashSet::len)
    }

    /// Gets the number of indexed items.
    pub fn len(&self) -> usize {
        self.raters.len()
    }

    /// Checks if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.raters.is_empty()
    }

    /// Inverts the index into per-user item lists, each sorted ascending.
    ///
    /// Items within a list are unique because they come from distinct map
    /// keys; sorting makes downstream pair enumeration canonical by
    /// construction.
    pub fn items_by_user(&self) -> Vec<Vec<u32>> {
        let mut by_user: HashMap<u32, Vec<u32>> = HashMap::new();
        for (&item_id, users) in &self.raters {
            for &user_id in users {
                by_user.entry(user_id).or_default().push(item_id);
            }
        }
        let mut lists: Vec<_> = by_user.into_values().collect();
        for items in &mut lists {
            items.sort_unstable();
        }
        lists
    }
}
