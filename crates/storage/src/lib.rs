#![forbid(unsafe_code)]

pub mod mapping;
pub mod repository;
pub mod sources;
pub mod store;

pub use mapping::GroupField;
pub use repository::{InMemorySource, RecordSource, SourceError};
pub use sources::{BambooSource, FileSource, HttpSource, SourceConfig};
pub use store::RecordStore;
