use std::cmp::Ordering;

use serde::Serialize;

use super::types::Entry;

/// Quadrant traversal used for numbering, matching the radar's reading direction.
pub const QUADRANT_ORDER: [usize; 4] = [2, 3, 1, 0];

pub const QUADRANT_COUNT: usize = 4;
pub const RING_COUNT: usize = 3;

/// Label collation used to order entries inside a bucket.
pub type LabelOrder = fn(&str, &str) -> Ordering;

/// Case-insensitive collation; labels equal ignoring case fall back to a plain comparison.
pub fn case_insensitive(a: &str, b: &str) -> Ordering {
    let lower = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    lower.then_with(|| a.cmp(b))
}

/// Entry indices grouped per `[quadrant][ring]`, each group sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Buckets {
    groups: [[Vec<usize>; RING_COUNT]; QUADRANT_COUNT],
}

impl Buckets {
    /// Callers validate quadrant and ring indices before bucketing.
    pub fn partition(entries: &[Entry], order: LabelOrder) -> Self {
        let mut buckets = Self::default();
        for (index, entry) in entries.iter().enumerate() {
            buckets.groups[entry.quadrant][entry.ring].push(index);
        }
        for ring_groups in &mut buckets.groups {
            for group in ring_groups {
                group.sort_by(|&a, &b| order(&entries[a].label, &entries[b].label));
            }
        }
        buckets
    }

    pub fn get(&self, quadrant: usize, ring: usize) -> &[usize] {
        &self.groups[quadrant][ring]
    }

    /// Entry indices in numbering order.
    pub fn traversal(&self) -> impl Iterator<Item = usize> + '_ {
        QUADRANT_ORDER.iter().flat_map(move |&q| {
            self.groups[q]
                .iter()
                .flat_map(|group| group.iter().copied())
        })
    }
}

/// Display ids per entry index: 1..=N assigned along the bucket traversal.
pub fn assign_ids(buckets: &Buckets, entry_count: usize) -> Vec<usize> {
    let mut ids = vec![0; entry_count];
    for (n, index) in buckets.traversal().enumerate() {
        ids[index] = n + 1;
    }
    ids
}
