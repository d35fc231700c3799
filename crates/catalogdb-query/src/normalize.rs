use serde::{Deserialize, Serialize};

use catalogdb_core::{CategoryId, OriginScore};

use crate::chips::{Chip, ChipRegistry};
use crate::descriptor::{PriceRange, QueryDescriptor, SortKey};

/// Raw UI input for one interaction. `chips` is in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub chips: Vec<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl RawQuery {
    pub fn text(text: impl Into<String>) -> Self { Self { text: text.into(), ..Self::default() } }
}

/// Turns raw UI input into a `QueryDescriptor`. Never fails.
///
/// Price range and sort key are single-valued: the last selection wins, and
/// the explicit `sort` field counts as the most recent selection. Score
/// thresholds AND together, so the highest one applies. Category `all` means
/// no category facet.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    registry: ChipRegistry,
    default_sort: SortKey,
}

impl Normalizer {
    pub fn new(registry: ChipRegistry, default_sort: SortKey) -> Self { Self { registry, default_sort } }

    pub fn registry(&self) -> &ChipRegistry { &self.registry }

    pub fn normalize(&self, raw: &RawQuery) -> QueryDescriptor {
        let mut price_range: Option<PriceRange> = None;
        let mut min_score: Option<OriginScore> = None;
        let mut sort_key = self.default_sort;

        for label in &raw.chips {
            match self.registry.resolve(label) {
                Some(Chip::PriceRange(range)) => price_range = Some(range),
                Some(Chip::MinScore(score)) => min_score = min_score.max(Some(score)),
                Some(Chip::Sort(key)) => sort_key = key,
                None => tracing::warn!(chip = %label, "ignoring unknown filter chip"),
            }
        }

        if let Some(sort) = raw.sort.as_deref() {
            match sort.parse::<SortKey>() {
                Ok(key) => sort_key = key,
                Err(e) => tracing::warn!(sort = %sort, error = %e, "ignoring sort selection"),
            }
        }

        QueryDescriptor::builder()
            .text(&raw.text)
            .maybe_category(normalize_category(raw.category.as_deref()))
            .maybe_price_range(price_range)
            .maybe_min_origin_score(min_score)
            .sort(sort_key)
            .build()
    }
}

fn normalize_category(raw: Option<&str>) -> Option<CategoryId> {
    let id = raw?.trim();
    if id.is_empty() || id.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(CategoryId::from(id))
}

/// Normalize with the default chip labels and `relevance` as default sort.
pub fn normalize(raw: &RawQuery) -> QueryDescriptor { Normalizer::default().normalize(raw) }
