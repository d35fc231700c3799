//! Candidate selection: AND-combined text, price and score predicates over
//! either the whole catalog or a single category.

use catalogdb_core::{CatalogStore, Listing, Result};

use crate::descriptor::QueryDescriptor;

/// Listings satisfying every active predicate, in store order.
///
/// Fails only when the descriptor names a category the store does not have.
pub fn candidates<'a, S>(store: &'a S, query: &QueryDescriptor) -> Result<Vec<&'a Listing>>
where
    S: CatalogStore + ?Sized,
{
    let mut listings = match query.category_id() {
        Some(id) => store.listings_by_category(id)?,
        None => store.all_listings(),
    };
    let before = listings.len();
    listings.retain(|l| matches_filters(l, query));
    tracing::debug!(scanned = before, kept = listings.len(), "filter applied");
    Ok(listings)
}

/// Full predicate, including the category facet.
pub fn matches(listing: &Listing, query: &QueryDescriptor) -> bool {
    query.category_id().map_or(true, |id| &listing.category_id == id) && matches_filters(listing, query)
}

fn matches_filters(listing: &Listing, query: &QueryDescriptor) -> bool {
    matches_text(listing, query.text())
        && query.price_range().map_or(true, |r| r.contains(listing.price))
        && query.min_origin_score().map_or(true, |min| listing.origin_score >= min)
}

/// Case-insensitive substring match on the name. `text` is already folded.
pub fn matches_text(listing: &Listing, text: &str) -> bool {
    text.is_empty() || listing.name.to_lowercase().contains(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_core::{OriginScore, Price};

    fn syrup() -> Listing {
        Listing::new("1", "Maple Syrup", Price::from_cents(1999), "food", OriginScore::new(95).unwrap())
    }

    #[test]
    fn text_is_plain_substring() {
        assert!(matches_text(&syrup(), "ple sy"));
        assert!(matches_text(&syrup(), ""));
        assert!(!matches_text(&syrup(), "syrups"));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let exact = QueryDescriptor::builder().price_range(Price::from_cents(1999), Price::from_cents(1999)).build();
        assert!(matches(&syrup(), &exact));
        let below = QueryDescriptor::builder().price_range(Price::ZERO, Price::from_cents(1998)).build();
        assert!(!matches(&syrup(), &below));
    }

    #[test]
    fn score_threshold_is_inclusive() {
        let at = QueryDescriptor::builder().min_origin_score(OriginScore::new(95).unwrap()).build();
        assert!(matches(&syrup(), &at));
        let above = QueryDescriptor::builder().min_origin_score(OriginScore::new(96).unwrap()).build();
        assert!(!matches(&syrup(), &above));
    }

    #[test]
    fn category_is_part_of_the_full_predicate() {
        assert!(matches(&syrup(), &QueryDescriptor::builder().category("food").build()));
        assert!(!matches(&syrup(), &QueryDescriptor::builder().category("clothing").build()));
    }
}
