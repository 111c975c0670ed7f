use super::{BrandDirectory, CatalogDocument, ItemStore};
use crate::error::{DrapeError, Result};
use crate::model::{Brand, CatalogItem};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog read from a JSON document on disk.
///
/// The file is re-read on every fetch, so edits show up on the next query.
/// Brand names come from the snapshot taken by the latest fetch (or a fresh
/// read if nothing has been fetched yet).
pub struct FileStore {
    path: PathBuf,
    brands: RefCell<Option<Vec<Brand>>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            brands: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CatalogDocument> {
        if !self.path.exists() {
            return Err(DrapeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("catalog not found: {}", self.path.display()),
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(DrapeError::Io)?;
        let doc: CatalogDocument = serde_json::from_str(&content)?;
        Ok(doc)
    }
}

impl ItemStore for FileStore {
    fn fetch_in_stock(&self) -> Result<Vec<CatalogItem>> {
        let doc = self.load()?;
        let items = doc.in_stock();
        *self.brands.borrow_mut() = Some(doc.brands);
        Ok(items)
    }
}

impl BrandDirectory for FileStore {
    fn brand_name(&self, id: &str) -> Option<String> {
        if self.brands.borrow().is_none() {
            let brands = self.load().map(|doc| doc.brands).unwrap_or_default();
            *self.brands.borrow_mut() = Some(brands);
        }
        self.brands
            .borrow()
            .as_ref()
            .and_then(|brands| brands.iter().find(|b| b.id == id))
            .map(|b| b.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("catalog.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_fetch_reads_in_stock_items() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            json!({
                "brands": [{"id": "b1", "name": "Northwind"}],
                "items": [
                    {"id": "1", "name": "Dress", "stock": 2, "attributes": "{fabric: 'Silk'}"},
                    {"id": "2", "name": "Gone", "stock": 0}
                ]
            }),
        );
        let store = FileStore::new(&path);
        let items = store.fetch_in_stock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Dress");
        assert_eq!(store.brand_name("b1").as_deref(), Some("Northwind"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nope.json"));
        match store.fetch_in_stock() {
            Err(DrapeError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {:?}", other),
        }
        assert_eq!(store.brand_name("b1"), None);
    }

    #[test]
    fn test_invalid_document_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(
            store.fetch_in_stock(),
            Err(DrapeError::Serialization(_))
        ));
    }

    #[test]
    fn test_refetch_sees_edits() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(&dir, json!({"items": [{"id": "1", "name": "A", "stock": 1}]}));
        let store = FileStore::new(&path);
        assert_eq!(store.fetch_in_stock().unwrap().len(), 1);

        write_catalog(
            &dir,
            json!({"items": [
                {"id": "1", "name": "A", "stock": 1},
                {"id": "2", "name": "B", "stock": 4}
            ]}),
        );
        assert_eq!(store.fetch_in_stock().unwrap().len(), 2);
    }
}
