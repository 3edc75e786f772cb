//! Concrete record sources and the configuration that selects one.

mod bamboo;
mod file;
mod http;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub use bamboo::BambooSource;
pub use file::FileSource;
pub use http::HttpSource;

use crate::repository::{RecordSource, SourceError};

/// Where the directory comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceConfig {
    File(PathBuf),
    Url(String),
    Bamboo { subdomain: String, api_key: String },
}

// API keys never reach logs.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceConfig::File(path) => f.debug_tuple("File").field(path).finish(),
            SourceConfig::Url(url) => f.debug_tuple("Url").field(url).finish(),
            SourceConfig::Bamboo { subdomain, .. } => f
                .debug_struct("Bamboo")
                .field("subdomain", subdomain)
                .field("api_key", &"***")
                .finish(),
        }
    }
}

impl SourceConfig {
    /// Instantiate the configured source.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` when a URL-based source cannot be parsed.
    pub fn build(&self) -> Result<Arc<dyn RecordSource>, SourceError> {
        Ok(match self {
            SourceConfig::File(path) => Arc::new(FileSource::new(path.clone())),
            SourceConfig::Url(url) => Arc::new(HttpSource::new(url)?),
            SourceConfig::Bamboo { subdomain, api_key } => {
                Arc::new(BambooSource::new(subdomain, api_key.clone())?)
            }
        })
    }
}
