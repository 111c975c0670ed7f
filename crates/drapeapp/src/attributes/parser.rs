//! Tolerant attribute payload parser.
//!
//! Every stage is a pure function returning `Option<ParsedAttributes>`; the
//! chain stops at the first stage that recovers at least one attribute. A
//! stage that errors internally (bad JSON, no regex hits) just yields `None`.
//!
//! | Stage | Input | Succeeds when |
//! |-------|-------|---------------|
//! | Structured | object payload, array of `{key, value}` pairs, or text that is already such JSON | always, for those shapes |
//! | Sanitized | [`sanitize`]d text | strict JSON parse gives an object with attributes |
//! | PatternExtracted | sanitized text | any `"k":"v"` or `"k":[...]` pair found |
//! | KnownAttributeProbe | raw text | any of [`KNOWN_ATTRIBUTES`] found |
//!
//! When nothing is recovered the stage is reported as [`ParseStage::Empty`].

use super::key::is_ignored_key;
use super::sanitize::sanitize;
use super::value::{AttrValue, ParsedAttributes};
use crate::model::RawPayload;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Attribute names probed for in text nothing else could make sense of.
pub const KNOWN_ATTRIBUTES: &[&str] = &[
    "fabric",
    "length",
    "primary colour",
    "pattern",
    "neck",
    "occasion",
    "print",
    "shape",
    "sleeve length",
    "sleeve styling",
];

/// Which recovery stage produced a [`ParsedAttributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Structured,
    Sanitized,
    PatternExtracted,
    KnownAttributeProbe,
    Empty,
}

impl std::fmt::Display for ParseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParseStage::Structured => "structured",
            ParseStage::Sanitized => "sanitized",
            ParseStage::PatternExtracted => "pattern_extracted",
            ParseStage::KnownAttributeProbe => "known_attribute_probe",
            ParseStage::Empty => "empty",
        };
        f.write_str(s)
    }
}

static SCALAR_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*:\s*"([^"]*)""#).expect("scalar pair regex"));

static ARRAY_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*:\s*\[([^\]]*)\]"#).expect("array pair regex"));

static KNOWN_PROBES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    KNOWN_ATTRIBUTES
        .iter()
        .map(|name| {
            let words: Vec<String> = name.split(' ').map(regex::escape).collect();
            let pattern = format!(
                r#"(?i)(?:^|[{{,;\n])\s*["']?{}["']?\s*[:=]\s*\[?\s*["']?([^"'\[\],;{{}}\n\r]+)"#,
                words.join("[ _]")
            );
            (*name, Regex::new(&pattern).expect("known attribute regex"))
        })
        .collect()
});

/// Parser carrying the set of extra keys to ignore on top of the built-ins.
#[derive(Debug, Clone, Default)]
pub struct AttributeParser {
    ignored_keys: Vec<String>,
}

impl AttributeParser {
    pub fn new(ignored_keys: Vec<String>) -> Self {
        Self { ignored_keys }
    }

    pub fn parse(&self, raw: &RawPayload) -> ParsedAttributes {
        self.parse_with_stage(raw).0
    }

    /// Parse and report which stage recovered the attributes.
    pub fn parse_with_stage(&self, raw: &RawPayload) -> (ParsedAttributes, ParseStage) {
        let recovered = match raw {
            RawPayload::Empty => None,
            RawPayload::Structured(map) => self
                .read_map(map)
                .map(|parsed| (parsed, ParseStage::Structured)),
            RawPayload::Text(text) => self.read_text(text),
            RawPayload::Other(Value::Array(items)) => self
                .read_pairs(items)
                .map(|parsed| (parsed, ParseStage::Structured))
                .or_else(|| self.read_text(&Value::Array(items.clone()).to_string())),
            RawPayload::Other(other) => self.read_text(&other.to_string()),
        };
        recovered.unwrap_or_else(|| (ParsedAttributes::new(), ParseStage::Empty))
    }

    fn read_text(&self, text: &str) -> Option<(ParsedAttributes, ParseStage)> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(parsed) = self.read_json(text) {
            return Some((parsed, ParseStage::Structured));
        }
        let sanitized = sanitize(text);
        self.strict(&sanitized)
            .map(|p| (p, ParseStage::Sanitized))
            .or_else(|| {
                tracing::debug!("strict parse failed, falling back to pattern extraction");
                self.patterns(&sanitized)
                    .map(|p| (p, ParseStage::PatternExtracted))
            })
            .or_else(|| {
                tracing::debug!("pattern extraction found nothing, probing known attributes");
                self.probe(text).map(|p| (p, ParseStage::KnownAttributeProbe))
            })
    }

    /// Stage 1: a structured mapping.
    fn read_map(&self, map: &Map<String, Value>) -> Option<ParsedAttributes> {
        let mut parsed = ParsedAttributes::new();
        for (key, value) in map {
            if is_ignored_key(key, &self.ignored_keys) {
                continue;
            }
            if let Some(value) = json_to_attr(value) {
                parsed.insert(key, value);
            }
        }
        non_empty(parsed)
    }

    /// Stage 1, legacy variant: `[{"key": "fabric", "value": "Silk"}, ...]`.
    fn read_pairs(&self, items: &[Value]) -> Option<ParsedAttributes> {
        let mut parsed = ParsedAttributes::new();
        for item in items {
            let Some(obj) = item.as_object() else {
                continue;
            };
            let key = obj
                .get("key")
                .or_else(|| obj.get("name"))
                .and_then(Value::as_str);
            let (Some(key), Some(value)) = (key, obj.get("value")) else {
                continue;
            };
            if is_ignored_key(key, &self.ignored_keys) {
                continue;
            }
            if let Some(value) = json_to_attr(value) {
                parsed.insert(key, value);
            }
        }
        non_empty(parsed)
    }

    /// Stage 1 for text: the text already is a JSON object or pair array.
    ///
    /// Sanitizing rewrites quotes and colons inside string values, so text
    /// that is valid as authored must never go through it.
    fn read_json(&self, text: &str) -> Option<ParsedAttributes> {
        match serde_json::from_str::<Value>(text).ok()? {
            Value::Object(map) => self.read_map(&map),
            Value::Array(items) => self.read_pairs(&items),
            _ => None,
        }
    }

    /// Stage 3: strict JSON parse of the sanitized text.
    fn strict(&self, sanitized: &str) -> Option<ParsedAttributes> {
        match serde_json::from_str::<Value>(sanitized) {
            Ok(Value::Object(map)) => self.read_map(&map),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "sanitized payload is not strict JSON");
                None
            }
        }
    }

    /// Stage 4: scrape `"key":"value"` and `"key":[...]` pairs.
    fn patterns(&self, sanitized: &str) -> Option<ParsedAttributes> {
        let mut hits: Vec<(usize, &str, Option<AttrValue>)> = Vec::new();
        for caps in SCALAR_PAIR.captures_iter(sanitized) {
            if let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) {
                hits.push((whole.start(), key.as_str(), AttrValue::scalar(value.as_str())));
            }
        }
        for caps in ARRAY_PAIR.captures_iter(sanitized) {
            if let (Some(whole), Some(key), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) {
                let elements = body
                    .as_str()
                    .split(',')
                    .map(|e| e.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace()));
                hits.push((whole.start(), key.as_str(), AttrValue::list(elements)));
            }
        }
        hits.sort_by_key(|(pos, _, _)| *pos);

        let mut parsed = ParsedAttributes::new();
        for (_, key, value) in hits {
            if is_ignored_key(key, &self.ignored_keys) {
                continue;
            }
            if let Some(value) = value {
                parsed.insert(key, value);
            }
        }
        non_empty(parsed)
    }

    /// Stage 5: look for each known attribute name in the raw text.
    fn probe(&self, raw: &str) -> Option<ParsedAttributes> {
        let mut parsed = ParsedAttributes::new();
        for (name, re) in KNOWN_PROBES.iter() {
            let value = re
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .and_then(|m| AttrValue::scalar(m.as_str()));
            if let Some(value) = value {
                parsed.insert(name, value);
            }
        }
        non_empty(parsed)
    }
}

/// Parse with the built-in ignored keys only.
pub fn parse(raw: &RawPayload) -> ParsedAttributes {
    AttributeParser::default().parse(raw)
}

pub fn parse_with_stage(raw: &RawPayload) -> (ParsedAttributes, ParseStage) {
    AttributeParser::default().parse_with_stage(raw)
}

fn json_to_attr(value: &Value) -> Option<AttrValue> {
    match value {
        Value::Array(items) => AttrValue::list(items.iter().filter_map(json_scalar_text)),
        other => json_scalar_text(other).and_then(AttrValue::scalar),
    }
}

fn json_scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn non_empty(parsed: ParsedAttributes) -> Option<ParsedAttributes> {
    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}
