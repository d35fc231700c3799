#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod loader;
pub mod seed;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use store::InMemoryCatalog;
pub use traits::{CatalogStore, CatalogVersion};
pub use types::{Category, CategoryId, Listing, ListingId, OriginScore, OriginTier, Price, Seller};
