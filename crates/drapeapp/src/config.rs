//! # Configuration
//!
//! Drape configuration is loaded with [`confique`], layered from environment
//! variables, TOML files, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `DRAPE_PRIORITY_KEYS`, `DRAPE_MAX_OPTIONS`.
//! 2. **Local Config**: `./drape.toml` in the working directory.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate),
//!    or `$DRAPE_CONFIG_DIR/drape.toml` when that is set.
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `priority_keys` | [`DEFAULT_PRIORITY_KEYS`] | Facet keys listed first |
//! | `ignored_keys` | none | Extra payload keys never turned into facets |
//! | `max_options_per_facet` | none | Display cap for the CLI; the engine never truncates |

use confique::Config;
use serde::{Deserialize, Serialize};

/// Facet keys listed first when no `priority_keys` is configured.
///
/// `confique` only accepts a literal in `#[config(default = ...)]`, so the
/// attribute below repeats this list; `test_compiled_default_matches_const`
/// keeps the two in step.
pub const DEFAULT_PRIORITY_KEYS: &[&str] = &[
    "Fabric",
    "Primary colour",
    "Occasion",
    "Pattern",
    "Length",
    "Sleeve length",
];

/// Configuration for drape, stored in `drape.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DrapeConfig {
    /// Facet keys surfaced first, in this order, regardless of counts.
    #[config(
        env = "DRAPE_PRIORITY_KEYS",
        parse_env = confique::env::parse::list_by_comma,
        default = ["Fabric", "Primary colour", "Occasion", "Pattern", "Length", "Sleeve length"]
    )]
    pub priority_keys: Vec<String>,

    /// Payload keys to drop in addition to `id`, `created_at`, `updated_at`
    /// and the container keys.
    pub ignored_keys: Option<Vec<String>>,

    /// Maximum options shown per facet by the CLI renderer.
    #[config(env = "DRAPE_MAX_OPTIONS")]
    pub max_options_per_facet: Option<usize>,
}

impl Default for DrapeConfig {
    fn default() -> Self {
        Self {
            priority_keys: DEFAULT_PRIORITY_KEYS.iter().map(|s| s.to_string()).collect(),
            ignored_keys: None,
            max_options_per_facet: None,
        }
    }
}

impl DrapeConfig {
    /// Extra ignored keys, empty when not configured.
    pub fn ignored_keys(&self) -> Vec<String> {
        self.ignored_keys.clone().unwrap_or_default()
    }
}
