//! # CLI Behavior
//!
//! This is **one possible client** for drape, not the engine itself. The CLI
//! is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ## Catalog Source
//!
//! Every command reads the catalog document named by `--catalog` (or
//! `DRAPE_CATALOG`), defaulting to `./catalog.json`. The file is read per
//! query; nothing is cached between invocations.
//!
//! ## Output Formats
//!
//! `--output text` (default) prints aligned, styled tables. `json` and `yaml`
//! print the full structured result, untruncated, for scripting.
//!
//! ## Logging
//!
//! Engine diagnostics go to stderr through `tracing`. The default level is
//! `warn`; `-v` raises it to `debug`; `RUST_LOG` overrides both.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: text rendering and structured serialization
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
