//! Filter predicates.
//!
//! Inclusion is decided in two passes. The mode predicate runs first (see
//! [`FilterMode`]), then every active [`AttrFilter`] must match:
//!
//! - values selected under the **same** key are OR'ed
//! - different keys are AND'ed
//! - a selected value matches when it is a case-insensitive substring of the
//!   recovered value (any element, for lists)
//! - an item without the filtered key is excluded, which includes items
//!   whose payload could not be parsed at all

use super::key::normalize_key;
use super::value::ParsedAttributes;
use crate::model::CatalogItem;
use crate::selection::{FilterMode, FilterSelection};

/// One active attribute key and the values accepted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrFilter {
    /// Normalized attribute key (e.g. "Fabric", "Primary colour")
    pub key: String,
    /// Accepted values; any one of them matching is enough
    pub values: Vec<String>,
}

impl AttrFilter {
    /// Filter accepting any of `values` under `key`. Blank values are dropped.
    pub fn any_of<I, S>(key: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.as_ref();
        Self {
            key: normalize_key(key).unwrap_or_else(|| key.to_string()),
            values: values
                .into_iter()
                .map(Into::into)
                .filter(|v: &String| !v.trim().is_empty())
                .collect(),
        }
    }

    /// Whether `parsed` satisfies this filter.
    ///
    /// Returns `false` when the key is absent. A filter with no values
    /// accepts everything.
    pub fn matches(&self, parsed: &ParsedAttributes) -> bool {
        if self.values.is_empty() {
            return true;
        }
        let Some(value) = parsed.get(&self.key) else {
            return false;
        };
        self.values.iter().any(|wanted| value.contains_ignore_case(wanted.trim()))
    }
}

/// Base predicate for the selection's mode.
pub fn mode_matches(item: &CatalogItem, selection: &FilterSelection) -> bool {
    match selection.mode {
        FilterMode::ByBodyShape => item.has_body_shape(&selection.body_shape),
        FilterMode::ByColor => item.has_color_tone(&selection.color_season),
        FilterMode::ByBrand => item.brand_id == selection.brand_id,
        FilterMode::All => {
            item.has_body_shape(&selection.body_shape)
                || item.has_color_tone(&selection.color_season)
        }
        FilterMode::ByAttributes => true,
    }
}

/// Decide whether `item` belongs in the filtered result.
pub fn includes(item: &CatalogItem, parsed: &ParsedAttributes, selection: &FilterSelection) -> bool {
    if !mode_matches(item, selection) {
        return false;
    }
    selection
        .active_filters()
        .iter()
        .all(|filter| filter.matches(parsed))
}
