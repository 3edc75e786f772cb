//! Shared error types for the services crate.

use thiserror::Error;

use storage::SourceError;

/// Errors emitted while bootstrapping the record store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("failed to load records: {0}")]
    Load(#[from] SourceError),
}
