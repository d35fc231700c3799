//! catalogdb-query
//!
//! Client-side catalog search: raw UI input is normalized into an immutable
//! `QueryDescriptor`, candidates are filtered from a `CatalogStore`, then
//! ordered by a total comparator. See `pipeline::execute` for the pure entry
//! point and `QueryEngine` for the memoized one screens call.
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod cache;
pub mod chips;
pub mod descriptor;
pub mod engine;
pub mod facets;
pub mod filter;
pub mod normalize;
pub mod page;
pub mod pipeline;
pub mod sort;

pub use cache::{CacheStats, CachedExecutor};
pub use chips::{Chip, ChipRegistry};
pub use descriptor::{PriceRange, QueryDescriptor, QueryDescriptorBuilder, SortKey};
pub use engine::QueryEngine;
pub use facets::category_counts;
pub use normalize::{normalize, Normalizer, RawQuery};
pub use page::{paginate, PageRequest, ResultPage};
pub use pipeline::execute;
