use std::collections::BTreeMap;

use catalogdb_core::{CategoryId, Listing};

/// Per-category counts over a result set, ordered by category id.
pub fn category_counts(results: &[Listing]) -> Vec<(CategoryId, usize)> {
    let mut counts: BTreeMap<&CategoryId, usize> = BTreeMap::new();
    for listing in results {
        *counts.entry(&listing.category_id).or_insert(0) += 1;
    }
    counts.into_iter().map(|(id, n)| (id.clone(), n)).collect()
}
