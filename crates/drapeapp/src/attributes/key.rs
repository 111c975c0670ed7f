//! Attribute key normalization.
//!
//! Payload keys are authored as `primary_colour`, `PRIMARY COLOUR`,
//! `Primary_Colour ` and so on. All of them collapse to `Primary colour`.

/// Keys that carry record bookkeeping or wrap the payload itself, never facets.
pub const BUILTIN_IGNORED_KEYS: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "attributes",
    "product_attributes",
];

/// Normalize a raw payload key.
///
/// Trims, turns underscores into spaces, collapses whitespace runs, then
/// uppercases the first character and lowercases the rest. Returns `None` for
/// keys that are empty after trimming.
pub fn normalize_key(raw: &str) -> Option<String> {
    let spaced = raw.replace('_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let first = chars.next()?;
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    Some(out)
}

/// Case-insensitive key comparison, tolerant of un-normalized input.
pub fn keys_equal(a: &str, b: &str) -> bool {
    match (normalize_key(a), normalize_key(b)) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

/// Whether a raw key is bookkeeping that should never become a facet.
pub fn is_ignored_key(raw: &str, extra: &[String]) -> bool {
    let Some(normalized) = normalize_key(raw) else {
        return true;
    };
    BUILTIN_IGNORED_KEYS
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .any(|ignored| keys_equal(ignored, &normalized))
}
