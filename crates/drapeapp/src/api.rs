//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for drape operations, whatever client sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Holds the configured engine**: the [`AttributeParser`] (with the
//!   configured extra ignored keys) and the [`FacetAggregator`] (with the
//!   configured priority keys) are built once from [`DrapeConfig`]
//! - **Returns structured types** (`Result<QueryResult>`, [`Facets`], ...)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Selection state**: [`FilterSelection`] is owned by the caller; the
//!   helpers here return a new selection and never keep one
//!
//! ## Generic Over the Store
//!
//! `DrapeApi<S: ItemStore + BrandDirectory>`:
//! - Production: `DrapeApi<FileStore>`
//! - Testing: `DrapeApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and that configuration reaches the engine.
//! Command logic is tested in the command modules.

use crate::attributes::{AttributeParser, ParseStage, ParsedAttributes};
use crate::commands::{self, BrandOption, QueryResult};
use crate::config::DrapeConfig;
use crate::error::Result;
use crate::facets::{FacetAggregator, Facets};
use crate::model::RawPayload;
use crate::selection::FilterSelection;
use crate::store::{BrandDirectory, ItemStore};

/// The main API facade for drape operations.
pub struct DrapeApi<S: ItemStore + BrandDirectory> {
    store: S,
    config: DrapeConfig,
    parser: AttributeParser,
    aggregator: FacetAggregator,
}

impl<S: ItemStore + BrandDirectory> DrapeApi<S> {
    pub fn new(store: S, config: DrapeConfig) -> Self {
        let parser = AttributeParser::new(config.ignored_keys());
        let aggregator = FacetAggregator::new(config.priority_keys.clone());
        Self {
            store,
            config,
            parser,
            aggregator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DrapeConfig {
        &self.config
    }

    /// Run one catalog query for `selection`.
    pub fn query(&self, selection: &FilterSelection) -> Result<QueryResult> {
        commands::query::run(&self.store, &self.parser, &self.aggregator, selection)
    }

    pub fn search_facets(&self, facets: &Facets, term: &str) -> Facets {
        commands::search::run(facets, term)
    }

    /// Toggle a facet value, ignoring values the listing does not offer.
    pub fn toggle_filter(
        &self,
        selection: &FilterSelection,
        facets: &Facets,
        key: &str,
        value: &str,
    ) -> FilterSelection {
        selection.toggle_filter_within(facets, key, value)
    }

    pub fn clear_filters(&self, selection: &FilterSelection) -> FilterSelection {
        selection.clear_filters()
    }

    /// Parse a single payload with the configured parser.
    pub fn parse_payload(&self, raw: &RawPayload) -> (ParsedAttributes, ParseStage) {
        self.parser.parse_with_stage(raw)
    }

    /// Brand options over the current in-stock catalog.
    pub fn brand_options(&self) -> Result<Vec<BrandOption>> {
        let items = self.store.fetch_in_stock()?;
        Ok(commands::brands::run(&items, &self.store))
    }
}
