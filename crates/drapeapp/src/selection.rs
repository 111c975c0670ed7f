//! # Filter Selection
//!
//! [`FilterSelection`] is the caller-owned description of what the shopper
//! asked for. It is a plain value: every "mutation" (`toggle_filter`,
//! `clear_filters`, `with_mode`, ...) returns a new selection and leaves the
//! original untouched, so a UI can hold the current one, compute the next
//! one, and re-query without sharing any mutable cell with the engine.
//!
//! ## Modes
//!
//! | Mode | Base predicate |
//! |------|----------------|
//! | `All` | body shape OR color season |
//! | `ByBodyShape` | body shape |
//! | `ByColor` | color season |
//! | `ByBrand` | brand id |
//! | `ByAttributes` | none (attribute filters only) |
//!
//! Attribute filters layer on top of every mode.

use crate::attributes::{normalize_key, AttrFilter};
use crate::facets::Facets;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    ByColor,
    ByBodyShape,
    ByAttributes,
    ByBrand,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub mode: FilterMode,
    #[serde(default)]
    pub body_shape: String,
    #[serde(default)]
    pub color_season: String,
    #[serde(default)]
    pub brand_id: Option<String>,
    /// Normalized attribute key → selected values. Keys with no values are
    /// never stored.
    #[serde(default, deserialize_with = "deserialize_filters")]
    pub attribute_filters: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_mode(&self, mode: FilterMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn with_body_shape(&self, body_shape: impl Into<String>) -> Self {
        Self {
            body_shape: body_shape.into(),
            ..self.clone()
        }
    }

    pub fn with_color_season(&self, color_season: impl Into<String>) -> Self {
        Self {
            color_season: color_season.into(),
            ..self.clone()
        }
    }

    pub fn with_brand(&self, brand_id: Option<String>) -> Self {
        Self {
            brand_id,
            ..self.clone()
        }
    }

    /// Select `value` under `key`, or deselect it if it is already selected.
    ///
    /// Blank keys or values leave the selection unchanged. Deselecting the
    /// last value of a key drops the key.
    pub fn toggle_filter(&self, key: &str, value: &str) -> Self {
        let (Some(key), value) = (normalize_key(key), value.trim()) else {
            return self.clone();
        };
        if value.is_empty() {
            return self.clone();
        }

        let mut next = self.clone();
        let values = next.attribute_filters.entry(key.clone()).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            next.attribute_filters.remove(&key);
        }
        next
    }

    /// Like [`toggle_filter`](Self::toggle_filter), but only selects values
    /// that exist in `facets`.
    ///
    /// A stale (key, value) from an outdated facet listing is ignored rather
    /// than turned into a filter nothing can match. Deselecting is always
    /// allowed.
    pub fn toggle_filter_within(&self, facets: &Facets, key: &str, value: &str) -> Self {
        if self.is_selected(key, value) || facets.contains(key, value) {
            self.toggle_filter(key, value)
        } else {
            tracing::debug!(key, value, "ignoring toggle for value absent from facets");
            self.clone()
        }
    }

    pub fn clear_filters(&self) -> Self {
        Self {
            attribute_filters: BTreeMap::new(),
            ..self.clone()
        }
    }

    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        normalize_key(key)
            .and_then(|k| self.attribute_filters.get(&k))
            .is_some_and(|values| values.contains(value.trim()))
    }

    /// Total number of individually selected values across all keys.
    ///
    /// Blank values are not counted; the evaluator ignores them too.
    pub fn applied_filter_count(&self) -> usize {
        self.attribute_filters
            .values()
            .map(|values| values.iter().filter(|v| !v.trim().is_empty()).count())
            .sum()
    }

    pub fn has_active_filters(&self) -> bool {
        self.applied_filter_count() > 0
    }

    /// One [`AttrFilter`] per key with at least one non-blank selected value.
    pub fn active_filters(&self) -> Vec<AttrFilter> {
        self.attribute_filters
            .iter()
            .map(|(key, values)| AttrFilter::any_of(key.clone(), values.iter().cloned()))
            .filter(|filter| !filter.values.is_empty())
            .collect()
    }
}

/// Reads `attribute_filters` under the same rules `toggle_filter` keeps:
/// keys normalized, values trimmed, blanks and empty keys dropped.
fn deserialize_filters<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeSet<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeSet<String>>::deserialize(deserializer)?;
    let mut filters: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (key, values) in raw {
        let Some(key) = normalize_key(&key) else {
            continue;
        };
        let values: BTreeSet<String> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        if !values.is_empty() {
            filters.entry(key).or_default().extend(values);
        }
    }
    Ok(filters)
}
