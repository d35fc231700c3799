//! Domain types shared by the catalog store and the query pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { Self(s.to_string()) }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self { Self(s) }
        }
    };
}

string_id!(
    /// Opaque listing identifier. Ordering is lexicographic over the raw bytes,
    /// which is the final tie-break of every sort key.
    ListingId
);

string_id!(
    /// Opaque category identifier.
    CategoryId
);

/// Non-negative amount in a single implicit currency, held as minor units.
///
/// Serialized as a decimal number (`19.99`) so catalog files stay readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self { Self(cents) }

    pub const fn cents(self) -> u64 { self.0 }

    /// Round a decimal amount to the nearest cent.
    pub fn from_decimal(amount: f64) -> Result<Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidValue(format!("price must be a non-negative number, got {amount}")));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(Error::InvalidValue(format!("price {amount} is out of range")));
        }
        Ok(Self(cents as u64))
    }

    pub fn as_decimal(self) -> f64 { self.0 as f64 / 100.0 }
}

impl TryFrom<f64> for Price {
    type Error = Error;
    fn try_from(amount: f64) -> Result<Self, Self::Error> { Self::from_decimal(amount) }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self { price.as_decimal() }
}

impl FromStr for Price {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidValue(format!("not a price: {s:?}")))?;
        Self::from_decimal(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Provenance/quality score in `[0, 100]`. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OriginScore(u8);

impl OriginScore {
    pub const MAX: u8 = 100;

    pub fn new(score: u8) -> Result<Self, Error> {
        if score > Self::MAX {
            return Err(Error::InvalidValue(format!("origin score must be within 0..=100, got {score}")));
        }
        Ok(Self(score))
    }

    pub const fn value(self) -> u8 { self.0 }

    pub fn tier(self) -> OriginTier {
        match self.0 {
            90.. => OriginTier::Excellent,
            75..=89 => OriginTier::Good,
            60..=74 => OriginTier::Average,
            _ => OriginTier::BelowAverage,
        }
    }
}

impl TryFrom<u8> for OriginScore {
    type Error = Error;
    fn try_from(score: u8) -> Result<Self, Self::Error> { Self::new(score) }
}

impl From<OriginScore> for u8 {
    fn from(score: OriginScore) -> Self { score.0 }
}

impl fmt::Display for OriginScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}%", self.0) }
}

/// Display band for an origin score, as shown on listing badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginTier {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl fmt::Display for OriginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::BelowAverage => "below average",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A sellable catalog item.
///
/// - `id`: unique within a catalog, stable for the session
/// - `category_id`: the one category this listing belongs to
/// - `origin_score`: opaque ranking attribute used by `origin_score_desc`
/// - `seller`/`features`: detail-screen data, never filtered or sorted on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub origin_score: OriginScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Listing {
    pub fn new(
        id: impl Into<ListingId>,
        name: impl Into<String>,
        price: Price,
        category_id: impl Into<CategoryId>,
        origin_score: OriginScore,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category_id: category_id.into(),
            origin_score,
            description: None,
            seller: None,
            features: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named grouping of listings.
///
/// `listing_count` is denormalized display data. It is never used for
/// filtering; see `InMemoryCatalog::actual_listing_count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub listing_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), listing_count: 0, icon: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rounds_to_cents() {
        assert_eq!(Price::from_decimal(19.99).unwrap().cents(), 1999);
        assert_eq!(Price::from_decimal(0.0).unwrap(), Price::ZERO);
        assert_eq!(Price::from_cents(19999).to_string(), "199.99");
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert!(Price::from_decimal(-0.01).is_err());
        assert!(Price::from_decimal(f64::NAN).is_err());
        assert!("abc".parse::<Price>().is_err());
        assert_eq!("$25".parse::<Price>().unwrap().cents(), 2500);
    }

    #[test]
    fn origin_score_bounds_and_tiers() {
        assert!(OriginScore::new(101).is_err());
        assert_eq!(OriginScore::new(95).unwrap().tier(), OriginTier::Excellent);
        assert_eq!(OriginScore::new(90).unwrap().tier(), OriginTier::Excellent);
        assert_eq!(OriginScore::new(75).unwrap().tier(), OriginTier::Good);
        assert_eq!(OriginScore::new(60).unwrap().tier(), OriginTier::Average);
        assert_eq!(OriginScore::new(0).unwrap().tier(), OriginTier::BelowAverage);
    }

    #[test]
    fn listing_json_uses_camel_case_and_decimal_price() {
        let json = r#"{"id":"1","name":"Maple Syrup","price":19.99,"categoryId":"food","originScore":95}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.price.cents(), 1999);
        assert_eq!(listing.category_id.as_str(), "food");
        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back["price"], serde_json::json!(19.99));
        assert!(back.get("seller").is_none());
    }

    #[test]
    fn listing_json_rejects_out_of_range_score() {
        let json = r#"{"id":"1","name":"x","price":1,"categoryId":"c","originScore":140}"#;
        assert!(serde_json::from_str::<Listing>(json).is_err());
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![ListingId::from("3"), ListingId::from("10"), ListingId::from("1")];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(ListingId::as_str).collect();
        assert_eq!(ordered, vec!["1", "10", "3"]);
    }
}
