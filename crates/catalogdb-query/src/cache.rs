//! Memoized execution keyed by `(CatalogVersion, QueryDescriptor)`.
//!
//! Results are shared as `Arc`s and evicted oldest-first once the configured
//! capacity is reached. Failed queries are not cached.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalogdb_core::{CatalogStore, CatalogVersion, Listing, Result};

use crate::descriptor::QueryDescriptor;
use crate::pipeline::execute;

type CacheKey = (CatalogVersion, QueryDescriptor);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
struct CacheState {
    results: HashMap<CacheKey, Arc<Vec<Listing>>>,
    order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

pub struct CachedExecutor<S> {
    store: S,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<S> CachedExecutor<S>
where
    S: CatalogStore,
{
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity, state: Mutex::new(CacheState::default()) }
    }

    pub fn store(&self) -> &S { &self.store }

    pub fn execute(&self, query: &QueryDescriptor) -> Result<Arc<Vec<Listing>>> {
        let key = (self.store.version(), query.clone());
        {
            let mut state = self.lock();
            let hit = state.results.get(&key).cloned();
            if let Some(hit) = hit {
                state.hits += 1;
                tracing::debug!(version = %key.0, "query cache hit");
                return Ok(hit);
            }
        }

        let results = Arc::new(execute(&self.store, query)?);
        let mut state = self.lock();
        state.misses += 1;
        tracing::debug!(version = %key.0, results = results.len(), "query cache miss");
        if self.capacity == 0 {
            return Ok(results);
        }
        if !state.results.contains_key(&key) {
            while state.order.len() >= self.capacity {
                match state.order.pop_front() {
                    Some(oldest) => {
                        state.results.remove(&oldest);
                    }
                    None => break,
                }
            }
            state.order.push_back(key.clone());
        }
        state.results.insert(key, Arc::clone(&results));
        Ok(results)
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats { hits: state.hits, misses: state.misses, entries: state.results.len() }
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.results.clear();
        state.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_core::seed::seed_catalog;
    use crate::descriptor::SortKey;

    #[test]
    fn repeated_query_hits_cache() {
        let exec = CachedExecutor::new(seed_catalog().unwrap(), 4);
        let q = QueryDescriptor::builder().text("maple").build();
        let first = exec.execute(&q).unwrap();
        let second = exec.execute(&q).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(exec.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let exec = CachedExecutor::new(seed_catalog().unwrap(), 2);
        let keys = [SortKey::PriceAsc, SortKey::PriceDesc, SortKey::OriginScoreDesc];
        for key in keys {
            exec.execute(&QueryDescriptor::builder().sort(key).build()).unwrap();
        }
        assert_eq!(exec.stats().entries, 2);
        exec.execute(&QueryDescriptor::builder().sort(SortKey::PriceAsc).build()).unwrap();
        assert_eq!(exec.stats().misses, 4, "evicted query recomputed");
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let exec = CachedExecutor::new(seed_catalog().unwrap(), 0);
        let q = QueryDescriptor::default();
        exec.execute(&q).unwrap();
        exec.execute(&q).unwrap();
        assert_eq!(exec.stats(), CacheStats { hits: 0, misses: 2, entries: 0 });
    }

    #[test]
    fn errors_are_not_cached() {
        let exec = CachedExecutor::new(seed_catalog().unwrap(), 4);
        let q = QueryDescriptor::builder().category("nonexistent").build();
        assert!(exec.execute(&q).unwrap_err().is_not_found());
        assert_eq!(exec.stats().entries, 0);
    }
}
