//! Canonical, immutable description of one search request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use catalogdb_core::{CategoryId, Error, OriginScore, Price};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    OriginScoreDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Relevance, Self::PriceAsc, Self::PriceDesc, Self::OriginScoreDesc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::OriginScoreDesc => "origin_score_desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Accepts the canonical names plus the ids the marketplace sort menu uses
/// (`price_low`, `price_high`, `canadian`).
impl FromStr for SortKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "price_asc" | "price_low" => Ok(Self::PriceAsc),
            "price_desc" | "price_high" => Ok(Self::PriceDesc),
            "origin_score_desc" | "canadian" => Ok(Self::OriginScoreDesc),
            other => Err(Error::InvalidValue(format!("unknown sort key {other:?}"))),
        }
    }
}

/// Inclusive `[min, max]` price bounds. Inverted bounds are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    pub fn new(a: Price, b: Price) -> Self {
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    pub fn min(&self) -> Price { self.min }

    pub fn max(&self) -> Price { self.max }

    pub fn contains(&self, price: Price) -> bool { self.min <= price && price <= self.max }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.min, self.max) }
}

/// Trim and case-fold free text. An empty result means "no text filter".
pub fn normalize_text(raw: &str) -> String { raw.trim().to_lowercase() }

/// One search request. Built once per user interaction and never mutated;
/// a new interaction produces a new descriptor, so equality is enough to
/// detect redundant recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QueryDescriptor {
    text: String,
    category_id: Option<CategoryId>,
    price_range: Option<PriceRange>,
    min_origin_score: Option<OriginScore>,
    sort_key: SortKey,
}

impl QueryDescriptor {
    pub fn builder() -> QueryDescriptorBuilder { QueryDescriptorBuilder::default() }

    /// Already normalized; empty when there is no text filter.
    pub fn text(&self) -> &str { &self.text }

    pub fn has_text(&self) -> bool { !self.text.is_empty() }

    pub fn category_id(&self) -> Option<&CategoryId> { self.category_id.as_ref() }

    pub fn price_range(&self) -> Option<PriceRange> { self.price_range }

    pub fn min_origin_score(&self) -> Option<OriginScore> { self.min_origin_score }

    pub fn sort_key(&self) -> SortKey { self.sort_key }

    /// Start a builder pre-filled with this descriptor's facets.
    pub fn to_builder(&self) -> QueryDescriptorBuilder {
        QueryDescriptorBuilder {
            text: self.text.clone(),
            category_id: self.category_id.clone(),
            price_range: self.price_range,
            min_origin_score: self.min_origin_score,
            sort_key: self.sort_key,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryDescriptorBuilder {
    text: String,
    category_id: Option<CategoryId>,
    price_range: Option<PriceRange>,
    min_origin_score: Option<OriginScore>,
    sort_key: SortKey,
}

impl QueryDescriptorBuilder {
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.text = normalize_text(text.as_ref());
        self
    }

    pub fn category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn maybe_category(mut self, id: Option<CategoryId>) -> Self {
        self.category_id = id;
        self
    }

    pub fn price_range(mut self, min: Price, max: Price) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn maybe_price_range(mut self, range: Option<PriceRange>) -> Self {
        self.price_range = range;
        self
    }

    pub fn min_origin_score(mut self, score: OriginScore) -> Self {
        self.min_origin_score = Some(score);
        self
    }

    pub fn maybe_min_origin_score(mut self, score: Option<OriginScore>) -> Self {
        self.min_origin_score = score;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn build(self) -> QueryDescriptor {
        QueryDescriptor {
            text: self.text,
            category_id: self.category_id,
            price_range: self.price_range,
            min_origin_score: self.min_origin_score,
            sort_key: self.sort_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_normalizes_text() {
        let q = QueryDescriptor::builder().text("  Maple SYRUP \t").build();
        assert_eq!(q.text(), "maple syrup");
        assert!(QueryDescriptor::builder().text("   ").build().text().is_empty());
    }

    #[test]
    fn inverted_price_range_is_swapped() {
        let r = PriceRange::new(Price::from_cents(5000), Price::from_cents(0));
        assert_eq!(r.min(), Price::ZERO);
        assert!(r.contains(Price::from_cents(5000)));
        assert!(!r.contains(Price::from_cents(5001)));
    }

    #[test]
    fn sort_key_aliases() {
        assert_eq!("price_low".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("PRICE_HIGH".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        assert_eq!("canadian".parse::<SortKey>().unwrap(), SortKey::OriginScoreDesc);
        assert!("cheapest".parse::<SortKey>().is_err());
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn to_builder_round_trips_facets() {
        let q = QueryDescriptor::builder().text("jam").category("2").sort(SortKey::PriceDesc).build();
        assert_eq!(q.to_builder().build(), q);
        assert_ne!(q.to_builder().sort(SortKey::PriceAsc).build(), q);
    }
}
