#![forbid(unsafe_code)]

pub mod model;

pub use model::{ParseIdError, Record, RecordDraft, RecordError, RecordId};
