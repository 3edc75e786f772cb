pub mod groups;
pub mod play;
