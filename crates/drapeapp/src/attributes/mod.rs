//! # Attribute System
//!
//! Product attribute payloads arrive in whatever shape the legacy authoring
//! tools produced: proper JSON objects, JSON-ish strings with single quotes and
//! bare keys, truncated text with missing braces. This module turns every one
//! of them into [`ParsedAttributes`], an ordered key → [`AttrValue`] mapping,
//! and evaluates filter predicates against the result.
//!
//! ## Value Types
//!
//! | Variant | Example | Counting | Matching |
//! |---------|---------|----------|----------|
//! | `Scalar` | `Fabric: "Cotton"` | one facet increment | substring of the value |
//! | `List` | `Sizes: ["S", "M"]` | one increment per element | substring of any element |
//!
//! ## Recovery Pipeline
//!
//! [`parse`] tries each stage in order and stops at the first success:
//!
//! 1. **Structured**: payload already is an object, or text that is valid JSON as written
//! 2. **Sanitized**: text rewritten into strict JSON and parsed
//! 3. **Pattern extracted**: `"key":"value"` / `"key":[...]` scraped from the sanitized text
//! 4. **Known-attribute probe**: fixed attribute names searched in the raw text
//!
//! Nothing past the parser boundary ever sees a parse error. The worst case
//! is an empty mapping.
//!
//! ## Usage
//!
//! ```ignore
//! let parsed = attributes::parse(&item.attributes);
//! if attributes::includes(&item, &parsed, &selection) { ... }
//! ```

mod filter;
mod key;
mod parser;
mod sanitize;
mod value;

pub use filter::{includes, mode_matches, AttrFilter};
pub use key::{is_ignored_key, keys_equal, normalize_key, BUILTIN_IGNORED_KEYS};
pub use parser::{parse, parse_with_stage, AttributeParser, ParseStage, KNOWN_ATTRIBUTES};
pub use sanitize::sanitize;
pub use value::{AttrValue, ParsedAttributes};
