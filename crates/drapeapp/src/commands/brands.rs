//! Brand options for the brand filter mode.

use crate::model::CatalogItem;
use crate::store::BrandDirectory;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandOption {
    pub brand_id: String,
    pub name: String,
    pub count: usize,
}

/// Count `items` per brand and label each brand through `directory`.
///
/// Items without a brand are skipped. Ids the directory does not know are
/// labeled with the raw id. Sorted by descending count, then name.
pub fn run<D: BrandDirectory + ?Sized>(items: &[CatalogItem], directory: &D) -> Vec<BrandOption> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in items.iter().filter_map(|item| item.brand_id.as_deref()) {
        *counts.entry(id).or_default() += 1;
    }

    let mut options: Vec<BrandOption> = counts
        .into_iter()
        .map(|(id, count)| BrandOption {
            brand_id: id.to_string(),
            name: directory.brand_name(id).unwrap_or_else(|| id.to_string()),
            count,
        })
        .collect();
    options.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.brand_id.cmp(&b.brand_id))
    });
    options
}
