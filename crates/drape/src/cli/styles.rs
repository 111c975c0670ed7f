//! Terminal styles for the drape CLI.
//!
//! Render code refers to these by meaning (a facet key, a count) and never
//! builds styles inline. `console` drops the escape codes when stdout is not
//! a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static FACET_KEY: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
pub static COUNT: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static ITEM_NAME: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static STAGE: Lazy<Style> = Lazy::new(|| Style::new().magenta().italic());
