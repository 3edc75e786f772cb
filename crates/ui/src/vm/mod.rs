mod filter_vm;
mod round_vm;

pub use filter_vm::{ALL_LABEL, FilterOptionVm, map_filter_options, resolve_group};
pub use round_vm::{ChoiceVm, RoundVm, map_round};
