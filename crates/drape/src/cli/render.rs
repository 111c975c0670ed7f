//! Output rendering.
//!
//! Text output is built as strings (so it can be tested without a terminal)
//! with columns aligned by display width, not byte length: facet values such
//! as `Côté` or CJK brand names must still line up. JSON and YAML output
//! serialize the engine's result types directly.

use super::setup::OutputFormat;
use super::styles::{COUNT, FACET_KEY, HEADING, ITEM_NAME, MUTED, STAGE};
use drapeapp::attributes::{AttrValue, ParseStage, ParsedAttributes};
use drapeapp::commands::{BrandOption, QueryResult};
use drapeapp::facets::Facets;
use drapeapp::selection::FilterSelection;
use serde::Serialize;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 32;
const SELECTED_MARKER: &str = "✓";

/// Serialize for `--output json|yaml`.
pub fn serialized<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json | OutputFormat::Text => {
            Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
        }
    }
}

pub fn query(result: &QueryResult, selection: &FilterSelection, max_options: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        HEADING.apply_to("Items"),
        MUTED.apply_to(format!(
            "({} of {} in stock)",
            result.stats.included, result.stats.candidates
        ))
    );
    if result.items.is_empty() {
        let _ = writeln!(out, "  {}", MUTED.apply_to("No items match."));
    }
    let id_width = result.items.iter().map(|i| i.id.width()).max().unwrap_or(0);
    for item in &result.items {
        let _ = writeln!(
            out,
            "  {}  {}  {:>9.2}",
            pad(&item.id, id_width),
            ITEM_NAME.apply_to(pad(&item.name, NAME_WIDTH)),
            item.price
        );
    }

    out.push('\n');
    out.push_str(&facets(&result.facets, Some(selection), max_options));

    let label = if result.applied_filter_count == 1 {
        "filter"
    } else {
        "filters"
    };
    let _ = writeln!(
        out,
        "\n{} {} applied",
        COUNT.apply_to(result.applied_filter_count),
        label
    );
    out
}

/// Facet listing; values already in `selection` are marked.
pub fn facets(facets: &Facets, selection: Option<&FilterSelection>, max_options: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADING.apply_to("Facets"));
    if facets.is_empty() {
        let _ = writeln!(out, "  {}", MUTED.apply_to("No facets."));
        return out;
    }

    for group in facets.groups() {
        let _ = writeln!(out, "  {}", FACET_KEY.apply_to(&group.key));
        let shown = max_options.unwrap_or(usize::MAX).min(group.options.len());
        let value_width = group.options[..shown]
            .iter()
            .map(|o| o.value.width().min(VALUE_WIDTH))
            .max()
            .unwrap_or(0);
        for option in &group.options[..shown] {
            let marker = match selection {
                Some(sel) if sel.is_selected(&group.key, &option.value) => SELECTED_MARKER,
                _ => " ",
            };
            let _ = writeln!(
                out,
                "   {} {}  {}",
                marker,
                pad(&option.value, value_width),
                COUNT.apply_to(option.count)
            );
        }
        let hidden = group.options.len() - shown;
        if hidden > 0 {
            let _ = writeln!(out, "     {}", MUTED.apply_to(format!("… {} more", hidden)));
        }
    }
    out
}

pub fn parsed(parsed: &ParsedAttributes, stage: Option<ParseStage>) -> String {
    let mut out = String::new();
    if let Some(stage) = stage {
        let _ = writeln!(out, "{} {}", MUTED.apply_to("stage:"), STAGE.apply_to(stage));
    }
    if parsed.is_empty() {
        let _ = writeln!(out, "{}", MUTED.apply_to("Nothing recovered."));
        return out;
    }

    let key_width = parsed.keys().map(|k| k.width()).max().unwrap_or(0);
    for (key, value) in parsed.iter() {
        let shown = match value {
            AttrValue::Scalar(s) => s.clone(),
            AttrValue::List(items) => items.join(", "),
        };
        let _ = writeln!(out, "{}  {}", FACET_KEY.apply_to(pad(key, key_width)), shown);
    }
    if !parsed.collisions().is_empty() {
        let _ = writeln!(
            out,
            "{}",
            MUTED.apply_to(format!(
                "duplicate keys ignored: {}",
                parsed.collisions().join(", ")
            ))
        );
    }
    out
}

pub fn brands(options: &[BrandOption]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADING.apply_to("Brands"));
    if options.is_empty() {
        let _ = writeln!(out, "  {}", MUTED.apply_to("No brands."));
        return out;
    }
    let name_width = options
        .iter()
        .map(|o| o.name.width().min(NAME_WIDTH))
        .max()
        .unwrap_or(0);
    for option in options {
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            pad(&option.name, name_width),
            COUNT.apply_to(option.count),
            MUTED.apply_to(format!("[{}]", option.brand_id))
        );
    }
    out
}

/// Pad (or truncate) `s` to exactly `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let shown = truncate_to_width(s, width);
    let fill = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    let budget = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > budget {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}
