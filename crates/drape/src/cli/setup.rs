use clap::{Args, Parser, Subcommand, ValueEnum};
use drapeapp::selection::{FilterMode, FilterSelection};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drape",
    bin_name = "drape",
    version,
    disable_help_subcommand = true,
    about = "Faceted filtering over catalogs with messy attribute payloads",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog document to read
    #[arg(
        long,
        global = true,
        env = "DRAPE_CATALOG",
        default_value = "catalog.json",
        help_heading = "Options"
    )]
    pub catalog: PathBuf,

    /// Output format
    #[arg(
        long,
        short = 'o',
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help_heading = "Options"
    )]
    pub output: OutputFormat,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    All,
    Color,
    BodyShape,
    Attributes,
    Brand,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::All => FilterMode::All,
            ModeArg::Color => FilterMode::ByColor,
            ModeArg::BodyShape => FilterMode::ByBodyShape,
            ModeArg::Attributes => FilterMode::ByAttributes,
            ModeArg::Brand => FilterMode::ByBrand,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the catalog and list matching items with facets
    #[command(alias = "q", display_order = 1)]
    Query(QueryArgs),

    /// List the facets of the in-stock catalog
    #[command(display_order = 2)]
    Facets {
        /// Only show facet keys or values containing this term
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Parse a single attribute payload and show what was recovered
    #[command(display_order = 3)]
    Parse {
        /// Also report which recovery stage succeeded
        #[arg(long)]
        stage: bool,

        /// Payload text, or `-` to read it from stdin
        #[arg(default_value = "-")]
        payload: String,
    },

    /// List brands with in-stock item counts
    #[command(display_order = 4)]
    Brands,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Base filter strategy
    #[arg(long, short = 'm', value_enum, default_value_t = ModeArg::All)]
    pub mode: ModeArg,

    /// Body shape for the `all` and `body-shape` modes
    #[arg(long)]
    pub body_shape: Option<String>,

    /// Color season for the `all` and `color` modes
    #[arg(long)]
    pub color_season: Option<String>,

    /// Brand id for the `brand` mode
    #[arg(long)]
    pub brand: Option<String>,

    /// Attribute filter as KEY=VALUE (repeatable; same key ORs, keys AND)
    #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

impl QueryArgs {
    /// Build the selection these arguments describe.
    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new(self.mode.into())
            .with_body_shape(self.body_shape.clone().unwrap_or_default())
            .with_color_season(self.color_season.clone().unwrap_or_default())
            .with_brand(self.brand.clone());
        for (key, value) in &self.filters {
            if !selection.is_selected(key, value) {
                selection = selection.toggle_filter(key, value);
            }
        }
        selection
    }

    /// Why the chosen mode cannot match any item, if its inputs are missing.
    ///
    /// A blank body shape or color season never matches, so `all` needs at
    /// least one of them and `body-shape` / `color` need their own.
    pub fn unmatchable_mode(&self) -> Option<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().unwrap_or("").trim().is_empty();
        match self.mode {
            ModeArg::All if blank(&self.body_shape) && blank(&self.color_season) => {
                Some("mode `all` without --body-shape or --color-season matches nothing")
            }
            ModeArg::BodyShape if blank(&self.body_shape) => {
                Some("mode `body-shape` without --body-shape matches nothing")
            }
            ModeArg::Color if blank(&self.color_season) => {
                Some("mode `color` without --color-season matches nothing")
            }
            _ => None,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(format!("expected KEY=VALUE, got `{}`", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
