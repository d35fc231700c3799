use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::types::{Category, CategoryId, Listing, ListingId};

/// Content fingerprint of a catalog snapshot. Equal content, equal version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogVersion(pub u64);

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:016x}", self.0) }
}

/// Read-only access to one immutable catalog snapshot.
///
/// Ordering returned by `all_listings` and `listings_by_category` is the store
/// order: unspecified, but it must not change between calls on the same
/// snapshot. Callers never rely on it for display order.
pub trait CatalogStore: Send + Sync {
    fn version(&self) -> CatalogVersion;
    fn all_listings(&self) -> Vec<&Listing>;
    /// `NotFound` for an unknown category; an empty vec for an empty one.
    fn listings_by_category(&self, id: &CategoryId) -> Result<Vec<&Listing>>;
    fn category(&self, id: &CategoryId) -> Result<&Category>;
    fn categories(&self) -> Vec<&Category>;
    fn listing(&self, id: &ListingId) -> Result<&Listing>;
}
