mod ids;
mod record;

pub use ids::{ParseIdError, RecordId};
pub use record::{Record, RecordDraft, RecordError};
