//! Line-oriented terminal adapter: parse typed commands, render rounds.

mod intent;
mod render;

pub use intent::{Intent, ParseIntentError, parse_intent};
pub use render::{render_groups, render_help, render_round};
