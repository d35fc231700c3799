//! Filter-chip labels and the facet each one selects.
//!
//! The marketplace UI mixes sort options and filters into one "active
//! filters" list. Each label resolves to exactly one facet here; the
//! normalizer decides how facets combine.

use std::collections::HashMap;

use catalogdb_core::{OriginScore, Price};

use crate::descriptor::{normalize_text, PriceRange, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    PriceRange(PriceRange),
    MinScore(OriginScore),
    Sort(SortKey),
}

#[derive(Debug, Clone)]
pub struct ChipRegistry {
    labels: HashMap<String, Chip>,
}

impl ChipRegistry {
    pub fn empty() -> Self { Self { labels: HashMap::new() } }

    pub fn register(&mut self, label: &str, chip: Chip) -> &mut Self {
        self.labels.insert(normalize_text(label), chip);
        self
    }

    /// Named labels win; otherwise `price:<min>-<max>`, `score:<n>` and
    /// `sort:<key>` are parsed.
    pub fn resolve(&self, label: &str) -> Option<Chip> {
        let label = normalize_text(label);
        if let Some(chip) = self.labels.get(&label) {
            return Some(*chip);
        }
        parse_structured(&label)
    }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}

impl Default for ChipRegistry {
    fn default() -> Self {
        let dollars = |d: u64| Price::from_cents(d * 100);
        let mut registry = Self::empty();
        registry
            .register("relevance", Chip::Sort(SortKey::Relevance))
            .register("price_low", Chip::Sort(SortKey::PriceAsc))
            .register("price_high", Chip::Sort(SortKey::PriceDesc))
            .register("canadian", Chip::Sort(SortKey::OriginScoreDesc))
            .register("under_25", Chip::PriceRange(PriceRange::new(Price::ZERO, dollars(25))))
            .register("25_to_100", Chip::PriceRange(PriceRange::new(dollars(25), dollars(100))))
            .register("100_to_500", Chip::PriceRange(PriceRange::new(dollars(100), dollars(500))))
            .register("any_price", Chip::PriceRange(PriceRange::new(Price::ZERO, dollars(500))));
        for threshold in [70u8, 80, 90] {
            if let Ok(score) = OriginScore::new(threshold) {
                registry.register(&format!("score_{threshold}"), Chip::MinScore(score));
            }
        }
        registry
    }
}

fn parse_structured(label: &str) -> Option<Chip> {
    let (facet, value) = label.split_once(':')?;
    let value = value.trim();
    match facet.trim() {
        "price" => {
            let (min, max) = value.split_once('-')?;
            let min: Price = min.parse().ok()?;
            let max: Price = max.parse().ok()?;
            Some(Chip::PriceRange(PriceRange::new(min, max)))
        }
        "score" => {
            let n: u8 = value.parse().ok()?;
            OriginScore::new(n).ok().map(Chip::MinScore)
        }
        "sort" => value.parse().ok().map(Chip::Sort),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels_resolve_case_insensitively() {
        let registry = ChipRegistry::default();
        assert_eq!(registry.resolve(" Price_Low "), Some(Chip::Sort(SortKey::PriceAsc)));
        assert_eq!(registry.resolve("score_80"), Some(Chip::MinScore(OriginScore::new(80).unwrap())));
        assert_eq!(registry.len(), 11);
    }

    #[test]
    fn structured_labels() {
        let registry = ChipRegistry::empty();
        assert_eq!(
            registry.resolve("price:0-50"),
            Some(Chip::PriceRange(PriceRange::new(Price::ZERO, Price::from_cents(5000))))
        );
        assert_eq!(
            registry.resolve("price: 19.99 - 5"),
            Some(Chip::PriceRange(PriceRange::new(Price::from_cents(500), Price::from_cents(1999))))
        );
        assert_eq!(registry.resolve("sort:canadian"), Some(Chip::Sort(SortKey::OriginScoreDesc)));
        assert_eq!(registry.resolve("score:101"), None);
        assert_eq!(registry.resolve("price:-5"), None);
        assert_eq!(registry.resolve("colour:red"), None);
        assert_eq!(registry.resolve("mystery"), None);
    }
}
