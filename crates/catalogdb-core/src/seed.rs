//! Built-in demo catalog for the marketplace screens.
//!
//! Category `listing_count` values are the marketing figures shown on the home
//! screen; they do not match the real membership.

use crate::error::Result;
use crate::store::InMemoryCatalog;
use crate::types::{Category, Listing, OriginScore, Price, Seller};

struct SeedListing {
    id: &'static str,
    name: &'static str,
    cents: u64,
    category: &'static str,
    score: u8,
    description: &'static str,
    seller: Option<(&'static str, &'static str, &'static str)>,
}

const CATEGORIES: &[(&str, &str, &str, u32)] = &[
    ("1", "Electronics", "laptop", 150),
    ("2", "Food & Beverage", "food-apple", 200),
    ("3", "Clothing", "tshirt-crew", 180),
    ("4", "Home & Garden", "home", 120),
    ("5", "Sports", "basketball", 95),
    ("6", "Books", "book-open-variant", 210),
    ("7", "Beauty", "face-woman", 130),
];

const LISTINGS: &[SeedListing] = &[
    SeedListing {
        id: "101",
        name: "Smart Speaker",
        cents: 7999,
        category: "1",
        score: 85,
        description: "High-quality smart speaker designed and manufactured in Canada with premium sound quality.",
        seller: Some(("s1", "TechNorth", "Ontario")),
    },
    SeedListing {
        id: "102",
        name: "Wireless Earbuds",
        cents: 12999,
        category: "1",
        score: 88,
        description: "Premium wireless earbuds with noise cancellation and long battery life. Designed in Vancouver.",
        seller: None,
    },
    SeedListing {
        id: "201",
        name: "Pure Canadian Maple Syrup",
        cents: 1999,
        category: "2",
        score: 95,
        description: "Pure Canadian maple syrup harvested from Quebec maple forests. 100% natural and traditionally processed.",
        seller: Some(("s2", "Canadian Delights", "Quebec")),
    },
    SeedListing {
        id: "202",
        name: "Ice Wine",
        cents: 4999,
        category: "2",
        score: 92,
        description: "Sweet dessert wine pressed from grapes frozen on the vine in the Niagara region.",
        seller: None,
    },
    SeedListing {
        id: "301",
        name: "Winter Down Jacket",
        cents: 19999,
        category: "3",
        score: 90,
        description: "Premium winter jacket designed for extreme Canadian winters. Ethically sourced down filling and water-resistant exterior.",
        seller: Some(("s3", "Northern Outfitters", "Alberta")),
    },
    SeedListing {
        id: "302",
        name: "Wool Toque",
        cents: 2499,
        category: "3",
        score: 94,
        description: "Knitted merino toque for cold mornings.",
        seller: None,
    },
    SeedListing {
        id: "401",
        name: "Cedar Planter",
        cents: 5999,
        category: "4",
        score: 89,
        description: "Raised planter built from western red cedar.",
        seller: None,
    },
    SeedListing {
        id: "402",
        name: "Garden Tools Set",
        cents: 8999,
        category: "4",
        score: 87,
        description: "Forged steel trowel, fork and pruner with ash handles.",
        seller: None,
    },
];

pub fn seed_catalog() -> Result<InMemoryCatalog> {
    let categories = CATEGORIES
        .iter()
        .map(|&(id, name, icon, count)| Category {
            listing_count: count,
            icon: Some(icon.to_string()),
            ..Category::new(id, name)
        })
        .collect();

    let mut listings = Vec::with_capacity(LISTINGS.len());
    for s in LISTINGS {
        let mut listing = Listing::new(s.id, s.name, Price::from_cents(s.cents), s.category, OriginScore::new(s.score)?)
            .with_description(s.description);
        listing.seller = s.seller.map(|(id, name, location)| Seller {
            id: id.to_string(),
            name: name.to_string(),
            location: Some(location.to_string()),
            verified: true,
        });
        listings.push(listing);
    }

    InMemoryCatalog::new(categories, listings)
}
