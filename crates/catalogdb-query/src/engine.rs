use std::sync::Arc;

use catalogdb_core::config::QuerySettings;
use catalogdb_core::{CatalogStore, Error, Listing, Result};

use crate::cache::{CacheStats, CachedExecutor};
use crate::chips::ChipRegistry;
use crate::descriptor::{QueryDescriptor, SortKey};
use crate::normalize::{Normalizer, RawQuery};
use crate::page::{paginate, PageRequest, ResultPage};

/// One entry point for every screen: raw UI input in, ordered listings out.
pub struct QueryEngine<S> {
    normalizer: Normalizer,
    executor: CachedExecutor<S>,
    settings: QuerySettings,
}

impl<S> QueryEngine<S>
where
    S: CatalogStore,
{
    pub fn new(store: S, settings: &QuerySettings) -> Result<Self> {
        Self::with_registry(store, settings, ChipRegistry::default())
    }

    pub fn with_registry(store: S, settings: &QuerySettings, registry: ChipRegistry) -> Result<Self> {
        let default_sort: SortKey = settings
            .default_sort
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("query.default_sort: {e}")))?;
        Ok(Self {
            normalizer: Normalizer::new(registry, default_sort),
            executor: CachedExecutor::new(store, settings.cache_capacity),
            settings: settings.clone(),
        })
    }

    pub fn store(&self) -> &S { self.executor.store() }

    pub fn normalize(&self, raw: &RawQuery) -> QueryDescriptor { self.normalizer.normalize(raw) }

    pub fn execute(&self, query: &QueryDescriptor) -> Result<Arc<Vec<Listing>>> { self.executor.execute(query) }

    pub fn search(&self, raw: &RawQuery) -> Result<Arc<Vec<Listing>>> { self.execute(&self.normalize(raw)) }

    pub fn search_page(&self, raw: &RawQuery, page: Option<usize>, per_page: Option<usize>) -> Result<ResultPage<Listing>> {
        let results = self.search(raw)?;
        Ok(paginate(&results, PageRequest::clamped(page, per_page, &self.settings)))
    }

    pub fn cache_stats(&self) -> CacheStats { self.executor.stats() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_core::seed::seed_catalog;

    #[test]
    fn invalid_default_sort_is_a_config_error() {
        let settings = QuerySettings { default_sort: "newest".into(), ..QuerySettings::default() };
        assert!(matches!(QueryEngine::new(seed_catalog().unwrap(), &settings), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn search_page_uses_configured_page_size() {
        let settings = QuerySettings { default_page_size: 3, ..QuerySettings::default() };
        let engine = QueryEngine::new(seed_catalog().unwrap(), &settings).unwrap();
        let page = engine.search_page(&RawQuery::default(), None, None).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 8);
        assert_eq!(page.total_pages, 3);
    }
}
