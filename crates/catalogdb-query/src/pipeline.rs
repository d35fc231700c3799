use catalogdb_core::{CatalogStore, Listing, Result};

use crate::descriptor::QueryDescriptor;
use crate::filter::candidates;
use crate::sort::sort_candidates;

/// Filter then sort. Pure: equal descriptors against the same snapshot give
/// identical ordered results. `NotFound` from the store is propagated as is.
pub fn execute<S>(store: &S, query: &QueryDescriptor) -> Result<Vec<Listing>>
where
    S: CatalogStore + ?Sized,
{
    let found = candidates(store, query)?;
    let ordered = sort_candidates(found, query);
    Ok(ordered.into_iter().cloned().collect())
}
