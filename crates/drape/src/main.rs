//! # Drape CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/drapeapp/`: the engine (parser, facets, filters, stores)
//! - `crates/drape/`: this CLI client, which depends on `drapeapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/drape/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring + dispatch (commands.rs)                  │
//! │  - text / JSON / YAML rendering (render.rs)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/drapeapp/src/api.rs)                     │
//! │  - Holds the configured parser and aggregator               │
//! │  - Dispatches to command modules                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/drapeapp/src/commands/*)             │
//! │  - Query orchestration, facet search, brand options         │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is responsible for **all** user-facing concerns: argument parsing,
//! context initialization, logging setup, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Engine**: unit tests next to each module plus integration tests in
//!   `crates/drapeapp/tests/`.
//! - **CLI**: argument parsing and rendering are unit tested in `src/cli/`;
//!   `tests/cli_e2e.rs` drives the real binary against a temporary catalog.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
