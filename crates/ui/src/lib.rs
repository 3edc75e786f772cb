#![forbid(unsafe_code)]

pub mod terminal;
pub mod vm;

pub use terminal::{
    Intent, ParseIntentError, parse_intent, render_groups, render_help, render_round,
};
pub use vm::{
    ALL_LABEL, ChoiceVm, FilterOptionVm, RoundVm, map_filter_options, map_round, resolve_group,
};
