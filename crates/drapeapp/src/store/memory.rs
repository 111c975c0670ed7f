use super::{BrandDirectory, CatalogDocument, ItemStore};
use crate::error::Result;
use crate::model::{Brand, CatalogItem};

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    catalog: CatalogDocument,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(catalog: CatalogDocument) -> Self {
        Self { catalog }
    }

    pub fn add_item(&mut self, item: CatalogItem) {
        self.catalog.items.push(item);
    }

    pub fn add_brand(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.catalog.brands.push(Brand {
            id: id.into(),
            name: name.into(),
        });
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.catalog.items
    }
}

impl ItemStore for InMemoryStore {
    fn fetch_in_stock(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.catalog.in_stock())
    }
}

impl BrandDirectory for InMemoryStore {
    fn brand_name(&self, id: &str) -> Option<String> {
        self.catalog.brand_name(id)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::RawPayload;

    /// Builder for small catalogs used across the test suites.
    pub struct CatalogFixture {
        pub store: InMemoryStore,
        next_id: usize,
    }

    impl Default for CatalogFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CatalogFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                next_id: 1,
            }
        }

        fn next_item(&mut self, name: &str) -> CatalogItem {
            let item = CatalogItem::new(self.next_id.to_string(), name);
            self.next_id += 1;
            item
        }

        /// Item whose payload is authored as text (possibly malformed).
        pub fn with_text_item(mut self, name: &str, payload: &str) -> Self {
            let mut item = self.next_item(name);
            item.attributes = RawPayload::text(payload);
            self.store.add_item(item);
            self
        }

        /// Item whose payload is a proper JSON object.
        pub fn with_structured_item(mut self, name: &str, payload: serde_json::Value) -> Self {
            let mut item = self.next_item(name);
            item.attributes = RawPayload::from(payload);
            self.store.add_item(item);
            self
        }

        pub fn with_tagged_item(mut self, name: &str, shapes: &[&str], tones: &[&str]) -> Self {
            let mut item = self.next_item(name);
            item.body_shapes = shapes.iter().map(|s| s.to_string()).collect();
            item.color_tones = tones.iter().map(|s| s.to_string()).collect();
            self.store.add_item(item);
            self
        }

        pub fn with_branded_item(mut self, name: &str, brand_id: &str) -> Self {
            let mut item = self.next_item(name);
            item.brand_id = Some(brand_id.to_string());
            self.store.add_item(item);
            self
        }

        pub fn with_out_of_stock_item(mut self, name: &str) -> Self {
            let mut item = self.next_item(name);
            item.stock = 0;
            self.store.add_item(item);
            self
        }

        pub fn with_item(mut self, item: CatalogItem) -> Self {
            self.next_id += 1;
            self.store.add_item(item);
            self
        }

        pub fn with_brand(mut self, id: &str, name: &str) -> Self {
            self.store.add_brand(id, name);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::CatalogFixture;
    use super::*;

    #[test]
    fn test_fetch_skips_out_of_stock() {
        let fixture = CatalogFixture::new()
            .with_text_item("Dress", "{fabric: silk}")
            .with_out_of_stock_item("Sold Out")
            .with_tagged_item("Top", &["Pear"], &["Spring"]);

        let items = fixture.store.fetch_in_stock().unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Dress", "Top"]);
        assert_eq!(fixture.store.items().len(), 3);
    }

    #[test]
    fn test_negative_stock_is_not_in_stock() {
        let mut item = CatalogItem::new("x", "Backorder");
        item.stock = -2;
        let store = CatalogFixture::new().with_item(item).store;
        assert!(store.fetch_in_stock().unwrap().is_empty());
    }

    #[test]
    fn test_brand_lookup() {
        let store = CatalogFixture::new().with_brand("b1", "Northwind").store;
        assert_eq!(store.brand_name("b1").as_deref(), Some("Northwind"));
        assert_eq!(store.brand_name("b2"), None);
    }

    #[test]
    fn test_fixture_ids_are_sequential() {
        let store = CatalogFixture::default()
            .with_branded_item("A", "b1")
            .with_branded_item("B", "b2")
            .store;
        let ids: Vec<_> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
