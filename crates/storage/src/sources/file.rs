use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::repository::{RecordSource, SourceError, parse_collection};

/// Reads the directory from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let value: Value = serde_json::from_slice(&bytes)?;
        parse_collection(value)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
