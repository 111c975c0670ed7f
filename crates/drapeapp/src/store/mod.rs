//! # Storage Collaborators
//!
//! The engine does not own the catalog. It consumes two collaborators:
//!
//! - [`ItemStore`]: "give me every item with stock > 0". This is the only
//!   I/O a query performs and the only step allowed to fail it.
//! - [`BrandDirectory`]: brand id → display name, used to label the brand
//!   option list. It never influences filtering.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: items and brands held in memory; used by
//!   tests and by embedders that already have the catalog loaded.
//! - [`fs::FileStore`]: a JSON catalog document re-read on every fetch.
//!
//! ## Catalog Document Layout
//!
//! ```text
//! {
//!   "brands": [{"id": "b1", "name": "Northwind"}],
//!   "items":  [{"id": "1", "name": "Wrap Dress", "stock": 3,
//!               "brand_id": "b1", "body_shapes": ["Hourglass"],
//!               "color_tones": ["Autumn"],
//!               "attributes": "{fabric: 'Silk'}"}]
//! }
//! ```

use crate::error::Result;
use crate::model::{Brand, CatalogItem};
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Source of candidate items for a query.
pub trait ItemStore {
    /// Every item with `stock > 0`, in store order.
    fn fetch_in_stock(&self) -> Result<Vec<CatalogItem>>;
}

/// Brand id → display name lookup.
pub trait BrandDirectory {
    fn brand_name(&self, id: &str) -> Option<String>;
}

/// Serialized form of a whole catalog, as read by [`fs::FileStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

impl CatalogDocument {
    pub fn in_stock(&self) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.in_stock())
            .cloned()
            .collect()
    }

    pub fn brand_name(&self, id: &str) -> Option<String> {
        self.brands
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.name.clone())
    }
}
