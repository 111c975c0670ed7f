//! # drapeapp
//!
//! Attribute recovery and faceted filtering for product catalogs whose
//! attribute payloads are legacy, hand-authored, and frequently broken.
//!
//! ## Layering
//!
//! ```text
//! api.rs          thin facade, generic over the item store
//!   commands/*    query orchestration, facet search, brand options
//!     attributes/ tolerant payload parser + filter predicates
//!     facets.rs   facet counting (mergeable tallies)
//!     selection.rs immutable filter selection value
//!   store/*       item store + brand lookup collaborators
//! ```
//!
//! Everything below `api.rs` is UI agnostic: no stdout, no process exits.
//! Parsing and predicate evaluation are total; the only fallible boundary is
//! the catalog fetch (and config loading at startup).

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod error;
pub mod facets;
pub mod init;
pub mod model;
pub mod selection;
pub mod store;
