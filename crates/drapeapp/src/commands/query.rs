//! Catalog query orchestration.
//!
//! 1. Fetch every in-stock item. Mode and attribute filters are *not* pushed
//!    down to the store, so facet counts describe the whole eligible catalog.
//! 2. Parse each payload (memoized by item id + payload fingerprint).
//! 3. Aggregate facets over all parsed payloads.
//! 4. Evaluate the selection against each item.
//! 5. Count the applied filter values.
//!
//! A fetch failure aborts the query with [`DrapeError::CatalogFetch`]; nothing
//! after the fetch can fail.

use super::{brands, QueryResult, QueryStats};
use crate::attributes::{includes, AttributeParser, ParseStage, ParsedAttributes};
use crate::error::{DrapeError, Result};
use crate::facets::FacetAggregator;
use crate::model::CatalogItem;
use crate::selection::FilterSelection;
use crate::store::{BrandDirectory, ItemStore};
use std::collections::HashMap;

/// Per-query parse memo keyed by (item id, payload fingerprint).
#[derive(Default)]
struct ParseMemo {
    entries: HashMap<(String, u64), (ParsedAttributes, ParseStage)>,
    hits: usize,
}

impl ParseMemo {
    fn parse(&mut self, parser: &AttributeParser, item: &CatalogItem) -> (ParsedAttributes, ParseStage) {
        let key = (item.id.clone(), item.attributes.fingerprint());
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!(item = %item.id, "parse memo hit");
            return cached.clone();
        }
        let parsed = parser.parse_with_stage(&item.attributes);
        self.entries.insert(key, parsed.clone());
        parsed
    }
}

pub fn run<S: ItemStore + BrandDirectory>(
    store: &S,
    parser: &AttributeParser,
    aggregator: &FacetAggregator,
    selection: &FilterSelection,
) -> Result<QueryResult> {
    let candidates = store.fetch_in_stock().map_err(|err| {
        tracing::warn!(error = %err, "catalog fetch failed");
        DrapeError::CatalogFetch(err.to_string())
    })?;

    let mut memo = ParseMemo::default();
    let mut stats = QueryStats {
        candidates: candidates.len(),
        ..Default::default()
    };
    let parsed: Vec<ParsedAttributes> = candidates
        .iter()
        .map(|item| {
            let (attrs, stage) = memo.parse(parser, item);
            *stats.parse_stages.entry(stage).or_default() += 1;
            attrs
        })
        .collect();

    let facets = aggregator.aggregate(&parsed);
    let brand_options = brands::run(&candidates, store);

    let items: Vec<CatalogItem> = candidates
        .into_iter()
        .zip(parsed.iter())
        .filter(|(item, attrs)| includes(item, attrs, selection))
        .map(|(item, _)| item)
        .collect();

    stats.included = items.len();
    stats.memo_hits = memo.hits;
    tracing::info!(
        candidates = stats.candidates,
        included = stats.included,
        facets = facets.len(),
        applied_filters = selection.applied_filter_count(),
        "catalog query complete"
    );

    Ok(QueryResult {
        items,
        facets,
        applied_filter_count: selection.applied_filter_count(),
        brands: brand_options,
        stats,
    })
}
