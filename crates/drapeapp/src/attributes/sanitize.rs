//! Text sanitizer for JSON-ish payloads.
//!
//! Rewrites hand-authored text toward strict JSON so that a regular parser
//! has a chance at it:
//!
//! ```text
//! {fabric: 'Cotton', primary_colour: 'Red'}
//!   -> {"fabric": "Cotton", "primary_colour": "Red"}
//! {"sizes": [S, M, L]
//!   -> {"sizes": [S, M, L]}
//! ```
//!
//! Array elements are left alone. A payload with bare array elements still
//! fails the strict parse and is picked up by pattern extraction instead.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BAREWORD_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([{,]\s*)([\p{L}_][\p{L}\p{N}_ \-]*?)\s*:").expect("bareword key regex")
});

static UNQUOTED_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#":(\s*)([^"\[\]{},\s][^,}\]"]*?)(\s*)([,}])"#).expect("unquoted value regex")
});

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma regex"));

/// Rewrite `raw` toward strict JSON. Total: always returns a string.
pub fn sanitize(raw: &str) -> String {
    let cleaned = collapse_whitespace(raw);
    let quoted = cleaned.replace('\'', "\"");
    let wrapped = wrap_in_braces(&quoted);
    let balanced = balance_brackets(&balance_braces(&wrapped));
    let keys = BAREWORD_KEY.replace_all(&balanced, "$1\"$2\":");
    let values = UNQUOTED_VALUE.replace_all(&keys, quote_value);
    TRAILING_COMMA.replace_all(&values, "$1").into_owned()
}

/// Control characters become spaces, then whitespace runs collapse to one.
fn collapse_whitespace(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn wrap_in_braces(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    if !s.starts_with('{') {
        out.push('{');
    }
    out.push_str(s);
    if !s.ends_with('}') {
        out.push('}');
    }
    out
}

/// Trim surplus trailing `}` or append missing ones.
fn balance_braces(s: &str) -> String {
    let opens = s.matches('{').count();
    let closes = s.matches('}').count();
    let mut out = s.to_string();
    if closes > opens {
        let mut excess = closes - opens;
        while excess > 0 && out.ends_with('}') {
            out.pop();
            excess -= 1;
        }
    } else {
        out.extend(std::iter::repeat('}').take(opens - closes));
    }
    out
}

/// Close dangling `[` just before the trailing run of `}`.
fn balance_brackets(s: &str) -> String {
    let opens = s.matches('[').count();
    let closes = s.matches(']').count();
    if opens <= closes {
        return s.to_string();
    }
    let body = s.trim_end_matches('}');
    let tail = &s[body.len()..];
    let mut out = body.to_string();
    out.extend(std::iter::repeat(']').take(opens - closes));
    out.push_str(tail);
    out
}

fn quote_value(caps: &Captures) -> String {
    let (lead, value, trail, terminator) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    if is_json_literal(value) {
        format!(":{lead}{value}{trail}{terminator}")
    } else {
        format!(":{lead}\"{value}\"{trail}{terminator}")
    }
}

fn is_json_literal(value: &str) -> bool {
    matches!(value, "true" | "false" | "null")
        || serde_json::from_str::<serde_json::Number>(value).is_ok()
}
