//! Recovered attribute values.
//!
//! [`AttrValue`] keeps the scalar/list duality explicit: a facet count and a
//! filter match behave differently for each, so callers always have to say
//! which case they are handling.

use super::key::normalize_key;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A recovered attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Single text value (e.g. `Fabric: "Cotton"`)
    Scalar(String),

    /// Ordered list of text values (e.g. `Sizes: ["S", "M", "L"]`)
    ///
    /// Never empty and never holds empty strings; see [`AttrValue::list`].
    List(Vec<String>),
}

impl AttrValue {
    /// Build a scalar, trimming it. Blank text yields `None`.
    pub fn scalar(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(AttrValue::Scalar(trimmed.to_string()))
        }
    }

    /// Build a list from raw elements, trimming each and dropping blanks.
    /// A list with nothing left yields `None`.
    pub fn list<I, S>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(AttrValue::List(items))
        }
    }

    /// Every individual value: one for a scalar, each element for a list.
    pub fn values(&self) -> &[String] {
        match self {
            AttrValue::Scalar(s) => std::slice::from_ref(s),
            AttrValue::List(items) => items,
        }
    }

    /// Whether `needle` is a case-insensitive substring of this value
    /// (of any element, for lists).
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.values()
            .iter()
            .any(|v| v.to_lowercase().contains(&needle))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            AttrValue::Scalar(s) => Some(s),
            AttrValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::Scalar(_) => None,
            AttrValue::List(items) => Some(items),
        }
    }
}

/// Normalized key → value mapping recovered from one payload.
///
/// Insertion ordered; lookups are case-insensitive. Derived fresh per item
/// per query and never mutated once the parser hands it out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    entries: Vec<(String, AttrValue)>,
    collisions: Vec<String>,
}

impl ParsedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the normalized form of `raw_key`.
    ///
    /// The first-seen key keeps its value: if another raw key already
    /// normalized to the same facet key, this one is dropped and recorded as
    /// a collision. Returns whether the value was stored.
    pub fn insert(&mut self, raw_key: &str, value: AttrValue) -> bool {
        let Some(key) = normalize_key(raw_key) else {
            return false;
        };
        if self.position(&key).is_some() {
            tracing::debug!(key = %key, raw_key, "attribute key collision, keeping first value");
            if !self.collisions.iter().any(|c| c == &key) {
                self.collisions.push(key);
            }
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        let key = normalize_key(key)?;
        self.position(&key).map(|idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized keys that were authored more than once in the payload.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    fn position(&self, normalized: &str) -> Option<usize> {
        let lower = normalized.to_lowercase();
        self.entries
            .iter()
            .position(|(k, _)| k.to_lowercase() == lower)
    }
}

impl Serialize for ParsedAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_trims_and_rejects_blank() {
        assert_eq!(
            AttrValue::scalar("  Cotton "),
            Some(AttrValue::Scalar("Cotton".into()))
        );
        assert_eq!(AttrValue::scalar("   "), None);
    }

    #[test]
    fn list_drops_empty_elements() {
        assert_eq!(
            AttrValue::list(["S", " ", "M", ""]),
            Some(AttrValue::List(vec!["S".into(), "M".into()]))
        );
        assert_eq!(AttrValue::list(["", "  "]), None);
        assert_eq!(AttrValue::list(Vec::<String>::new()), None);
    }

    #[test]
    fn values_flattens_both_cases() {
        assert_eq!(AttrValue::Scalar("Red".into()).values(), ["Red"]);
        assert_eq!(
            AttrValue::List(vec!["S".into(), "M".into()]).values(),
            ["S", "M"]
        );
    }

    #[test]
    fn contains_ignore_case_matches_substrings() {
        assert!(AttrValue::Scalar("Red Floral".into()).contains_ignore_case("red"));
        assert!(AttrValue::Scalar("DARK RED".into()).contains_ignore_case("Red"));
        assert!(!AttrValue::Scalar("Blue".into()).contains_ignore_case("red"));
        let list = AttrValue::List(vec!["Cotton".into(), "Silk Blend".into()]);
        assert!(list.contains_ignore_case("silk"));
        assert!(!list.contains_ignore_case("wool"));
    }

    #[test]
    fn as_accessors() {
        assert_eq!(AttrValue::Scalar("x".into()).as_scalar(), Some("x"));
        assert_eq!(AttrValue::Scalar("x".into()).as_list(), None);
        let list = vec!["a".to_string()];
        assert_eq!(
            AttrValue::List(list.clone()).as_list(),
            Some(list.as_slice())
        );
    }

    #[test]
    fn insert_normalizes_and_keeps_first_on_collision() {
        let mut parsed = ParsedAttributes::new();
        assert!(parsed.insert("fabric", AttrValue::Scalar("Cotton".into())));
        assert!(!parsed.insert("FABRIC", AttrValue::Scalar("Silk".into())));
        assert!(!parsed.insert("Fabric", AttrValue::Scalar("Wool".into())));

        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed.get("fabric"),
            Some(&AttrValue::Scalar("Cotton".into()))
        );
        assert_eq!(parsed.collisions(), ["Fabric"]);
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut parsed = ParsedAttributes::new();
        parsed.insert("primary_colour", AttrValue::Scalar("Red".into()));
        assert!(parsed.contains_key("Primary colour"));
        assert!(parsed.contains_key("PRIMARY_COLOUR"));
        assert!(!parsed.contains_key("colour"));
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["Primary colour"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut parsed = ParsedAttributes::new();
        parsed.insert("sizes", AttrValue::List(vec!["S".into(), "M".into()]));
        parsed.insert("fabric", AttrValue::Scalar("Silk".into()));
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"Sizes":["S","M"],"Fabric":"Silk"}"#);
    }
}
