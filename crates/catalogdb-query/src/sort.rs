//! Result ordering.
//!
//! Every sort key ends in a unique tie-break (listing id, or store position
//! for relevance without text), so the comparator is a total order and
//! results are reproducible.

use std::cmp::Ordering;

use catalogdb_core::Listing;

use crate::descriptor::{QueryDescriptor, SortKey};

/// How well a name matches the query text, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceTier {
    Exact,
    Prefix,
    Contains,
    /// Only reachable when ranking listings the filter did not select.
    Unrelated,
}

impl RelevanceTier {
    pub fn of(name: &str, text: &str) -> Self {
        let folded = name.to_lowercase();
        if folded == text {
            Self::Exact
        } else if folded.starts_with(text) {
            Self::Prefix
        } else if folded.contains(text) {
            Self::Contains
        } else {
            Self::Unrelated
        }
    }
}

/// A candidate plus the precomputed keys the comparator needs.
#[derive(Debug, Clone, Copy)]
pub struct SortEntry<'a> {
    pub position: usize,
    pub tier: RelevanceTier,
    pub listing: &'a Listing,
}

impl<'a> SortEntry<'a> {
    pub fn new(position: usize, listing: &'a Listing, text: &str) -> Self {
        let tier = if text.is_empty() { RelevanceTier::Contains } else { RelevanceTier::of(&listing.name, text) };
        Self { position, tier, listing }
    }
}

pub fn compare(a: &SortEntry<'_>, b: &SortEntry<'_>, key: SortKey, has_text: bool) -> Ordering {
    let (la, lb) = (a.listing, b.listing);
    match key {
        SortKey::PriceAsc => la.price.cmp(&lb.price).then_with(|| la.id.cmp(&lb.id)),
        SortKey::PriceDesc => lb.price.cmp(&la.price).then_with(|| la.id.cmp(&lb.id)),
        SortKey::OriginScoreDesc => lb
            .origin_score
            .cmp(&la.origin_score)
            .then_with(|| la.price.cmp(&lb.price))
            .then_with(|| la.id.cmp(&lb.id)),
        SortKey::Relevance if has_text => a.tier.cmp(&b.tier).then_with(|| la.id.cmp(&lb.id)),
        SortKey::Relevance => a.position.cmp(&b.position),
    }
}

/// Order candidates for `query`. Input order is taken as store order.
pub fn sort_candidates<'a>(candidates: Vec<&'a Listing>, query: &QueryDescriptor) -> Vec<&'a Listing> {
    let key = query.sort_key();
    let has_text = query.has_text();
    if key == SortKey::Relevance && !has_text {
        return candidates;
    }
    let mut entries: Vec<SortEntry<'a>> = candidates
        .into_iter()
        .enumerate()
        .map(|(pos, l)| SortEntry::new(pos, l, query.text()))
        .collect();
    entries.sort_by(|a, b| compare(a, b, key, has_text));
    tracing::debug!(sort = %key, results = entries.len(), "candidates sorted");
    entries.into_iter().map(|e| e.listing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_core::{OriginScore, Price};

    fn item(id: &str, name: &str, cents: u64, score: u8) -> Listing {
        Listing::new(id, name, Price::from_cents(cents), "c", OriginScore::new(score).unwrap())
    }

    fn ids(listings: &[&Listing]) -> Vec<String> { listings.iter().map(|l| l.id.to_string()).collect() }

    #[test]
    fn relevance_tiers() {
        assert_eq!(RelevanceTier::of("Maple", "maple"), RelevanceTier::Exact);
        assert_eq!(RelevanceTier::of("Maple Syrup", "maple"), RelevanceTier::Prefix);
        assert_eq!(RelevanceTier::of("Pure Maple Syrup", "maple"), RelevanceTier::Contains);
        assert_eq!(RelevanceTier::of("Wool Toque", "maple"), RelevanceTier::Unrelated);
    }

    #[test]
    fn relevance_ranks_tiers_then_ids() {
        let listings = [
            item("9", "Pure Maple Syrup", 100, 50),
            item("5", "Maple Syrup", 100, 50),
            item("7", "maple", 100, 50),
            item("2", "Sugar Maple Bowl", 100, 50),
        ];
        let q = QueryDescriptor::builder().text("MAPLE").build();
        let sorted = sort_candidates(listings.iter().collect(), &q);
        assert_eq!(ids(&sorted), vec!["7", "5", "2", "9"]);
    }

    #[test]
    fn relevance_without_text_keeps_input_order() {
        let listings = [item("3", "b", 5, 1), item("1", "a", 1, 9)];
        let sorted = sort_candidates(listings.iter().collect(), &QueryDescriptor::default());
        assert_eq!(ids(&sorted), vec!["3", "1"]);
    }

    #[test]
    fn origin_score_breaks_ties_by_price_then_id() {
        let listings = [item("b", "x", 500, 90), item("c", "x", 100, 90), item("a", "x", 500, 90), item("d", "x", 1, 80)];
        let q = QueryDescriptor::builder().sort(SortKey::OriginScoreDesc).build();
        assert_eq!(ids(&sort_candidates(listings.iter().collect(), &q)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn price_desc_ties_use_ascending_id() {
        let listings = [item("3", "x", 1999, 1), item("1", "x", 1999, 1), item("2", "x", 2500, 1)];
        let q = QueryDescriptor::builder().sort(SortKey::PriceDesc).build();
        assert_eq!(ids(&sort_candidates(listings.iter().collect(), &q)), vec!["2", "1", "3"]);
    }
}
