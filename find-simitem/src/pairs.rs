//! Canonical item pairs and co-occurrence counting.

use hashbrown::HashMap;
use rayon::prelude::*;

/// An unordered pair of distinct item ids, stored smaller id first so that
/// (a, b) and (b, a) collapse to one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPair {
    a: u32,
    b: u32,
}

impl ItemPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Panics
    ///
    /// Panics if `x == y`; an item paired with itself is meaningless.
    pub fn new(x: u32, y: u32) -> Self {
        assert!(x != y);
        if x < y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Gets the smaller item id.
    pub const fn first(&self) -> u32 {
        self.a
    }

    /// Gets the larger item id.
    pub const fn second(&self) -> u32 {
        self.b
    }

    /// Checks whether the pair touches an item.
    pub const fn contains(&self, item_id: u32) -> bool {
        self.a == item_id || self.b == item_id
    }

    /// Gets the pair member that is not `item_id`, or `None` if the pair
    /// does not touch `item_id`.
    pub const fn other(&self, item_id: u32) -> Option<u32> {
        if self.a == item_id {
            Some(self.b)
        } else if self.b == item_id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Co-occurrence counts keyed by canonical item pair.
///
/// Each user contributes at most one occurrence per pair.
#[derive(Clone, Debug, Default)]
pub struct PairCounts {
    counts: HashMap<ItemPair, u32>,
}

impl PairCounts {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerates the upper-triangular item pairs of every user's sorted
    /// item list, counting each pair once per user.
    ///
    /// Users with fewer than two items contribute nothing.
    pub fn from_user_items(user_items: &[Vec<u32>]) -> Self {
        let mut counts = Self::new();
        for items in user_items {
            counts.add_user(items);
        }
        counts
    }

    /// Like [`PairCounts::from_user_items`], but folds per-thread partial
    /// tables over the users and reduces them with [`PairCounts::merge`].
    pub fn from_user_items_in_parallel(user_items: &[Vec<u32>]) -> Self {
        user_items
            .par_iter()
            .fold(Self::new, |mut counts, items| {
                counts.add_user(items);
                counts
            })
            .reduce(Self::new, |mut lhs, rhs| {
                lhs.merge(rhs);
                lhs
            })
    }

    fn add_user(&mut self, items: &[u32]) {
        if items.len() < 2 {
            return;
        }
        for (i, &x) in items.iter().enumerate() {
            for &y in &items[i + 1..] {
                // The list is sorted, so (x, y) is already canonical.
                *self.counts.entry(ItemPair::new(x, y)).or_insert(0) += 1;
            }
        }
    }

    /// Adds another partial table into this one.
    ///
    /// Per-key addition is commutative and associative, so merge order
    /// never affects the totals.
    pub fn merge(&mut self, other: Self) {
        for (pair, n) in other.counts {
            *self.counts.entry(pair).or_insert(0) += n;
        }
    }

    /// Gets the co-occurrence count of a pair.
    pub fn count(&self, pair: ItemPair) -> u32 {
        self.counts.get(&pair).copied().unwrap_or(0)
    }

    /// Gets the number of distinct counted pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over pairs and their counts in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemPair, u32)> + '_ {
        self.counts.iter().map(|(&pair, &n)| (pair, n))
    }
}
