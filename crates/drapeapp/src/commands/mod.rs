//! # Command Layer
//!
//! The business logic behind the API facade. Each command is a plain
//! function over domain types and returns structured data; rendering and
//! argument parsing belong to the client.
//!
//! ## Command Modules
//!
//! - [`query`]: fetch, parse, aggregate facets, filter
//! - [`search`]: narrow an existing facet listing by a term
//! - [`brands`]: brand option list for the brand mode
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` fixtures and cover the logic branches;
//! the API facade tests only check dispatch.

use crate::attributes::ParseStage;
use crate::facets::Facets;
use crate::model::CatalogItem;
use serde::Serialize;
use std::collections::BTreeMap;

pub mod brands;
pub mod query;
pub mod search;

pub use brands::BrandOption;

/// Counters describing how a query went; useful when auditing legacy data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// In-stock items fetched from the store
    pub candidates: usize,
    /// Items that passed the mode predicate and attribute filters
    pub included: usize,
    /// How many candidates each parser stage recovered
    pub parse_stages: BTreeMap<ParseStage, usize>,
    /// Parses answered from the per-query memo
    pub memo_hits: usize,
}

/// Result of one catalog query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub items: Vec<CatalogItem>,
    pub facets: Facets,
    pub applied_filter_count: usize,
    pub brands: Vec<BrandOption>,
    pub stats: QueryStats,
}
