//! # Domain Model: Catalog Items and Raw Payloads
//!
//! [`CatalogItem`] is owned by the external item store; the engine only reads
//! it for the duration of one query. Its `attributes` field carries whatever
//! the legacy authoring tools left behind, captured as a [`RawPayload`]:
//!
//! | Shape on the wire | Variant |
//! |-------------------|---------|
//! | missing / `null` | `Empty` |
//! | JSON object | `Structured` |
//! | JSON string (usually broken JSON-ish text) | `Text` |
//! | anything else (numbers, arrays) | `Other` |
//!
//! None of these are rejected at deserialization time. Turning them into
//! facets is the job of [`crate::attributes::parse`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Raw attribute payload as authored, before any recovery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPayload {
    #[default]
    Empty,
    Structured(Map<String, Value>),
    Text(String),
    Other(Value),
}

impl RawPayload {
    pub fn text(s: impl Into<String>) -> Self {
        RawPayload::Text(s.into())
    }

    /// Stable hash of the payload's canonical serialization.
    ///
    /// Used to memoize parse results within a single query.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self {
            RawPayload::Empty => 0u8.hash(&mut hasher),
            RawPayload::Structured(map) => {
                1u8.hash(&mut hasher);
                Value::Object(map.clone()).to_string().hash(&mut hasher);
            }
            RawPayload::Text(s) => {
                2u8.hash(&mut hasher);
                s.hash(&mut hasher);
            }
            RawPayload::Other(v) => {
                3u8.hash(&mut hasher);
                v.to_string().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawPayload::Empty,
            Value::Object(map) => RawPayload::Structured(map),
            Value::String(s) => RawPayload::Text(s),
            other => RawPayload::Other(other),
        }
    }
}

/// A product as served by the item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub body_shapes: Vec<String>,
    #[serde(default)]
    pub color_tones: Vec<String>,
    #[serde(default)]
    pub attributes: RawPayload,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: 0.0,
            stock: 1,
            brand_id: None,
            body_shapes: Vec::new(),
            color_tones: Vec::new(),
            attributes: RawPayload::Empty,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn has_body_shape(&self, shape: &str) -> bool {
        let shape = shape.to_lowercase();
        self.body_shapes.iter().any(|s| s.to_lowercase() == shape)
    }

    pub fn has_color_tone(&self, tone: &str) -> bool {
        let tone = tone.to_lowercase();
        self.color_tones.iter().any(|t| t.to_lowercase() == tone)
    }
}

/// Brand record served by the brand lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
}
