//! # Facet Aggregation
//!
//! Facets are the (key, value, count) options shown next to a result list.
//! They are computed fresh for every query from the parsed payloads of the
//! full candidate set, before any mode or attribute filter narrows it, so
//! shoppers can discover options they have not selected yet.
//!
//! ## Counting
//!
//! Every individual value increments its own count: an item with
//! `Fabric: ["Cotton", "Silk"]` adds one to `Cotton` and one to `Silk`.
//!
//! ## Ordering
//!
//! - Options within a key: descending count, ties in first-seen order.
//! - Keys: configured priority keys first (in configured order), then every
//!   other key in first-seen order.
//!
//! ## Partial Aggregates
//!
//! [`FacetTally`] is the running count. Tallies built from disjoint slices of
//! the catalog can be combined with [`FacetTally::merge`]; counts add and
//! first-seen order follows the left operand. This keeps the reduction
//! associative, so the catalog can be split and counted in pieces.

use crate::attributes::{normalize_key, ParsedAttributes};
use serde::Serialize;
use std::collections::HashMap;

/// One selectable filter choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub attribute_key: String,
    pub value: String,
    pub count: usize,
}

/// All options for one attribute key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetGroup {
    pub key: String,
    pub options: Vec<FacetOption>,
}

impl FacetGroup {
    pub fn total(&self) -> usize {
        self.options.iter().map(|o| o.count).sum()
    }
}

/// Ordered facet listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Facets {
    groups: Vec<FacetGroup>,
}

impl Facets {
    pub fn from_groups(groups: Vec<FacetGroup>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .filter(|g| !g.options.is_empty())
                .collect(),
        }
    }

    pub fn groups(&self) -> &[FacetGroup] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&FacetGroup> {
        let key = normalize_key(key)?.to_lowercase();
        self.groups.iter().find(|g| g.key.to_lowercase() == key)
    }

    /// Whether `value` is an option under `key`. Key match is
    /// case-insensitive; value match is exact after trimming.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        let value = value.trim();
        self.get(key)
            .is_some_and(|g| g.options.iter().any(|o| o.value == value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn option_count(&self) -> usize {
        self.groups.iter().map(|g| g.options.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct KeyTally {
    key: String,
    values: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl KeyTally {
    fn new(key: String) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    fn bump(&mut self, value: &str, by: usize) {
        match self.positions.get(value) {
            Some(&idx) => self.values[idx].1 += by,
            None => {
                self.positions.insert(value.to_string(), self.values.len());
                self.values.push((value.to_string(), by));
            }
        }
    }
}

/// Running facet counts; mergeable.
#[derive(Debug, Clone, Default)]
pub struct FacetTally {
    keys: Vec<KeyTally>,
    positions: HashMap<String, usize>,
}

impl FacetTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every value of every attribute in `parsed`.
    pub fn add(&mut self, parsed: &ParsedAttributes) {
        for (key, value) in parsed.iter() {
            let tally = self.key_mut(key);
            for v in value.values() {
                tally.bump(v, 1);
            }
        }
    }

    /// Combine two partial tallies by adding counts.
    pub fn merge(mut self, other: FacetTally) -> FacetTally {
        for tally in other.keys {
            let target = self.key_mut(&tally.key);
            for (value, count) in tally.values {
                target.bump(&value, count);
            }
        }
        self
    }

    /// Order the counts into a [`Facets`] listing.
    pub fn finish(self, priority_keys: &[String]) -> Facets {
        let mut groups: Vec<Option<FacetGroup>> = self
            .keys
            .into_iter()
            .map(|tally| {
                let mut options: Vec<FacetOption> = tally
                    .values
                    .into_iter()
                    .filter(|(_, count)| *count > 0)
                    .map(|(value, count)| FacetOption {
                        attribute_key: tally.key.clone(),
                        value,
                        count,
                    })
                    .collect();
                // Stable: equal counts keep first-seen order
                options.sort_by(|a, b| b.count.cmp(&a.count));
                Some(FacetGroup {
                    key: tally.key,
                    options,
                })
            })
            .collect();

        let mut ordered = Vec::with_capacity(groups.len());
        for wanted in priority_keys {
            let Some(wanted) = normalize_key(wanted).map(|k| k.to_lowercase()) else {
                continue;
            };
            let slot = groups.iter_mut().find(|g| {
                g.as_ref()
                    .is_some_and(|g| g.key.to_lowercase() == wanted)
            });
            if let Some(group) = slot.and_then(Option::take) {
                ordered.push(group);
            }
        }
        ordered.extend(groups.into_iter().flatten());
        Facets::from_groups(ordered)
    }

    fn key_mut(&mut self, key: &str) -> &mut KeyTally {
        let lookup = key.to_lowercase();
        let idx = match self.positions.get(&lookup) {
            Some(&idx) => idx,
            None => {
                self.positions.insert(lookup, self.keys.len());
                self.keys.push(KeyTally::new(key.to_string()));
                self.keys.len() - 1
            }
        };
        &mut self.keys[idx]
    }
}

/// Builds [`Facets`] with a fixed set of priority keys surfaced first.
#[derive(Debug, Clone, Default)]
pub struct FacetAggregator {
    priority_keys: Vec<String>,
}

impl FacetAggregator {
    pub fn new(priority_keys: Vec<String>) -> Self {
        Self { priority_keys }
    }

    pub fn priority_keys(&self) -> &[String] {
        &self.priority_keys
    }

    pub fn aggregate(&self, items: &[ParsedAttributes]) -> Facets {
        self.aggregate_iter(items.iter())
    }

    pub fn aggregate_iter<'a, I>(&self, items: I) -> Facets
    where
        I: IntoIterator<Item = &'a ParsedAttributes>,
    {
        let mut tally = FacetTally::new();
        for parsed in items {
            tally.add(parsed);
        }
        tally.finish(&self.priority_keys)
    }
}
