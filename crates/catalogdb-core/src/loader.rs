use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::store::InMemoryCatalog;
use crate::types::{Category, Listing};

/// On-disk catalog document: `{ "categories": [...], "listings": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> Result<InMemoryCatalog> {
        InMemoryCatalog::new(self.categories, self.listings)
    }
}

pub fn parse_catalog(json: &str) -> Result<InMemoryCatalog> {
    let file: CatalogFile = serde_json::from_str(json)?;
    file.into_catalog()
}

pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    tracing::info!(path = %path.display(), listings = catalog.len(), "catalog loaded");
    Ok(catalog)
}
