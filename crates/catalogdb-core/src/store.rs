//! In-memory catalog snapshot.
//!
//! Holds the full set of listings and categories for a session. Store order is
//! the order listings were supplied in; category membership is indexed once at
//! construction so category browsing does not rescan the catalog.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use crate::error::{Error, Result};
use crate::traits::{CatalogStore, CatalogVersion};
use crate::types::{Category, CategoryId, Listing, ListingId};

#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    listings: Vec<Listing>,
    category_index: HashMap<CategoryId, usize>,
    listing_index: HashMap<ListingId, usize>,
    members: HashMap<CategoryId, Vec<usize>>,
    version: CatalogVersion,
}

impl InMemoryCatalog {
    /// Build a snapshot, rejecting duplicate ids, blank names and listings
    /// that point at a category the catalog does not contain.
    pub fn new(categories: Vec<Category>, listings: Vec<Listing>) -> Result<Self> {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (pos, c) in categories.iter().enumerate() {
            if c.id.as_str().is_empty() {
                return Err(Error::InvalidCatalog(format!("category at position {pos} has an empty id")));
            }
            if c.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!("category {} has an empty name", c.id)));
            }
            if category_index.insert(c.id.clone(), pos).is_some() {
                return Err(Error::InvalidCatalog(format!("duplicate category id {}", c.id)));
            }
        }

        let mut listing_index = HashMap::with_capacity(listings.len());
        let mut members: HashMap<CategoryId, Vec<usize>> =
            categories.iter().map(|c| (c.id.clone(), Vec::new())).collect();
        for (pos, l) in listings.iter().enumerate() {
            if l.id.as_str().is_empty() {
                return Err(Error::InvalidCatalog(format!("listing at position {pos} has an empty id")));
            }
            if l.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!("listing {} has an empty name", l.id)));
            }
            if listing_index.insert(l.id.clone(), pos).is_some() {
                return Err(Error::InvalidCatalog(format!("duplicate listing id {}", l.id)));
            }
            match members.get_mut(&l.category_id) {
                Some(slots) => slots.push(pos),
                None => {
                    return Err(Error::InvalidCatalog(format!(
                        "listing {} references unknown category {}",
                        l.id, l.category_id
                    )))
                }
            }
        }

        let version = fingerprint(&categories, &listings);
        tracing::debug!(categories = categories.len(), listings = listings.len(), %version, "catalog snapshot built");
        Ok(Self { categories, listings, category_index, listing_index, members, version })
    }

    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            listings: Vec::new(),
            category_index: HashMap::new(),
            listing_index: HashMap::new(),
            members: HashMap::new(),
            version: fingerprint(&[], &[]),
        }
    }

    pub fn len(&self) -> usize { self.listings.len() }

    pub fn is_empty(&self) -> bool { self.listings.is_empty() }

    /// Count listings that really belong to `id`, ignoring the denormalized
    /// `Category::listing_count`.
    pub fn actual_listing_count(&self, id: &CategoryId) -> Result<usize> {
        self.members
            .get(id)
            .map(Vec::len)
            .ok_or_else(|| Error::category_not_found(id.as_str()))
    }

    /// Categories whose stored count disagrees with the real membership.
    pub fn stale_counts(&self) -> Vec<(&Category, usize)> {
        self.categories
            .iter()
            .filter_map(|c| {
                let actual = self.members.get(&c.id).map_or(0, Vec::len);
                (c.listing_count as usize != actual).then_some((c, actual))
            })
            .collect()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn version(&self) -> CatalogVersion { self.version }

    fn all_listings(&self) -> Vec<&Listing> { self.listings.iter().collect() }

    fn listings_by_category(&self, id: &CategoryId) -> Result<Vec<&Listing>> {
        let slots = self.members.get(id).ok_or_else(|| Error::category_not_found(id.as_str()))?;
        Ok(slots.iter().filter_map(|&pos| self.listings.get(pos)).collect())
    }

    fn category(&self, id: &CategoryId) -> Result<&Category> {
        self.category_index
            .get(id)
            .and_then(|&pos| self.categories.get(pos))
            .ok_or_else(|| Error::category_not_found(id.as_str()))
    }

    fn categories(&self) -> Vec<&Category> { self.categories.iter().collect() }

    fn listing(&self, id: &ListingId) -> Result<&Listing> {
        self.listing_index
            .get(id)
            .and_then(|&pos| self.listings.get(pos))
            .ok_or_else(|| Error::listing_not_found(id.as_str()))
    }
}

fn fingerprint(categories: &[Category], listings: &[Listing]) -> CatalogVersion {
    let mut hasher = XxHash64::with_seed(0);
    categories.hash(&mut hasher);
    listings.hash(&mut hasher);
    CatalogVersion(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OriginScore, Price};

    fn listing(id: &str, category: &str) -> Listing {
        Listing::new(id, format!("item {id}"), Price::from_cents(100), category, OriginScore::new(50).unwrap())
    }

    #[test]
    fn rejects_dangling_category_reference() {
        let err = InMemoryCatalog::new(vec![Category::new("a", "A")], vec![listing("1", "b")]).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(msg) if msg.contains("unknown category b")));
    }

    #[test]
    fn rejects_duplicate_listing_ids() {
        let err = InMemoryCatalog::new(vec![Category::new("a", "A")], vec![listing("1", "a"), listing("1", "a")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_blank_names() {
        let mut l = listing("1", "a");
        l.name = "   ".into();
        assert!(InMemoryCatalog::new(vec![Category::new("a", "A")], vec![l]).is_err());
        assert!(InMemoryCatalog::new(vec![Category::new("a", "")], vec![]).is_err());
    }

    #[test]
    fn version_tracks_content() {
        let a = InMemoryCatalog::new(vec![Category::new("a", "A")], vec![listing("1", "a")]).unwrap();
        let b = InMemoryCatalog::new(vec![Category::new("a", "A")], vec![listing("1", "a")]).unwrap();
        let c = InMemoryCatalog::new(vec![Category::new("a", "A")], vec![listing("2", "a")]).unwrap();
        assert_eq!(a.version(), b.version());
        assert_ne!(a.version(), c.version());
    }

    #[test]
    fn stale_counts_reports_mismatches() {
        let mut cat = Category::new("a", "A");
        cat.listing_count = 150;
        let store = InMemoryCatalog::new(vec![cat, Category::new("b", "B")], vec![listing("1", "a")]).unwrap();
        let stale = store.stale_counts();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].0.id.as_str(), "a");
        assert_eq!(stale[0].1, 1);
    }
}
