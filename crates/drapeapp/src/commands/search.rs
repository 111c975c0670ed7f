//! Narrow an existing facet listing by a search term.
//!
//! Works purely on the listing it is given; it never re-fetches or re-parses.

use crate::facets::{FacetGroup, Facets};

/// Keep options whose key or value contains `term` (case-insensitive).
///
/// A blank term returns the listing unchanged. Groups left without options
/// are dropped; surviving groups and options keep their order.
pub fn run(facets: &Facets, term: &str) -> Facets {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return facets.clone();
    }

    let groups = facets
        .groups()
        .iter()
        .map(|group| {
            if group.key.to_lowercase().contains(&term) {
                return group.clone();
            }
            FacetGroup {
                key: group.key.clone(),
                options: group
                    .options
                    .iter()
                    .filter(|opt| opt.value.to_lowercase().contains(&term))
                    .cloned()
                    .collect(),
            }
        })
        .collect();
    Facets::from_groups(groups)
}
