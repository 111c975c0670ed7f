//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the logging subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments into typed commands via clap
//! 2. **Context Setup**: load config and open the catalog via `drapeapp::init`
//! 3. **Dispatch**: route each command to its handler
//! 4. **Output Formatting**: text through `render`, or JSON / YAML
//! 5. **Error Handling**: errors bubble up as `anyhow::Error` to `main`

use super::render;
use super::setup::{Cli, Commands, OutputFormat, QueryArgs};
use anyhow::Context;
use clap::Parser;
use drapeapp::init::{initialize, DrapeContext};
use drapeapp::model::RawPayload;
use drapeapp::selection::{FilterMode, FilterSelection};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, &cli.catalog)?;
    tracing::debug!(catalog = %ctx.api.store().path().display(), "context ready");

    let output = match &cli.command {
        Commands::Query(args) => handle_query(&ctx, args, cli.output)?,
        Commands::Facets { search } => handle_facets(&ctx, search.as_deref(), cli.output)?,
        Commands::Parse { stage, payload } => handle_parse(&ctx, payload, *stage, cli.output)?,
        Commands::Brands => handle_brands(&ctx, cli.output)?,
    };
    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_query(ctx: &DrapeContext, args: &QueryArgs, format: OutputFormat) -> anyhow::Result<String> {
    if let Some(reason) = args.unmatchable_mode() {
        tracing::warn!("{}", reason);
    }
    let selection = args.selection();
    let result = ctx.api.query(&selection)?;
    match format {
        OutputFormat::Text => Ok(render::query(
            &result,
            &selection,
            ctx.config.max_options_per_facet,
        )),
        _ => render::serialized(&result, format),
    }
}

fn handle_facets(ctx: &DrapeContext, search: Option<&str>, format: OutputFormat) -> anyhow::Result<String> {
    // Facets never depend on the selection; any mode gives the full listing
    let result = ctx.api.query(&FilterSelection::new(FilterMode::ByAttributes))?;
    let facets = match search {
        Some(term) => ctx.api.search_facets(&result.facets, term),
        None => result.facets,
    };
    match format {
        OutputFormat::Text => Ok(render::facets(
            &facets,
            None,
            ctx.config.max_options_per_facet,
        )),
        _ => render::serialized(&facets, format),
    }
}

#[derive(Serialize)]
struct ParseReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<drapeapp::attributes::ParseStage>,
    attributes: &'a drapeapp::attributes::ParsedAttributes,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    collisions: &'a [String],
}

fn handle_parse(
    ctx: &DrapeContext,
    payload: &str,
    show_stage: bool,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let text = if payload == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        payload.to_string()
    };

    let raw = payload_from_text(&text);
    let (parsed, stage) = ctx.api.parse_payload(&raw);
    let stage = show_stage.then_some(stage);
    match format {
        OutputFormat::Text => Ok(render::parsed(&parsed, stage)),
        _ => render::serialized(
            &ParseReport {
                stage,
                attributes: &parsed,
                collisions: parsed.collisions(),
            },
            format,
        ),
    }
}

/// Interpret command-line payload text the way the catalog would store it.
///
/// Valid JSON (an object, a quoted string, ...) is taken as that JSON value;
/// anything else is the raw text a legacy tool left behind.
fn payload_from_text(text: &str) -> RawPayload {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => RawPayload::from(value),
        Err(_) => RawPayload::text(text),
    }
}

fn handle_brands(ctx: &DrapeContext, format: OutputFormat) -> anyhow::Result<String> {
    let options = ctx.api.brand_options()?;
    match format {
        OutputFormat::Text => Ok(render::brands(&options)),
        _ => render::serialized(&options, format),
    }
}
