use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Errors surfaced by record sources.
///
/// Any of these means the load failed as a whole; individual malformed records
/// never produce a `SourceError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid source url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record collection: {0}")]
    Malformed(String),
}

/// Contract for the one-shot retrieval of the person directory.
///
/// Sources return the raw collection; turning values into records (and
/// dropping the malformed ones) is the store's job.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the whole record collection.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source is unreachable or does not return a
    /// well-formed collection.
    async fn fetch(&self) -> Result<Vec<Value>, SourceError>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Accepts either a bare array or an object wrapping the array in `employees`.
///
/// # Errors
///
/// Returns `SourceError::Malformed` for any other shape.
pub fn parse_collection(value: Value) -> Result<Vec<Value>, SourceError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("employees") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(SourceError::Malformed(
                "`employees` is not an array".into(),
            )),
            None => Err(SourceError::Malformed(
                "expected an array of records or an `employees` array".into(),
            )),
        },
        other => Err(SourceError::Malformed(format!(
            "expected an array of records, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Simple in-memory source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    values: Arc<Vec<Value>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: Arc::new(values),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `fetch` has been called.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} values)", self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_is_a_collection() {
        let items = parse_collection(json!([{ "id": "1" }, { "id": "2" }])).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn employees_wrapper_is_unwrapped() {
        let items = parse_collection(json!({
            "fields": [],
            "employees": [{ "id": "1" }]
        }))
        .unwrap();
        assert_eq!(items, vec![json!({ "id": "1" })]);
    }

    #[test]
    fn other_shapes_are_malformed() {
        for value in [json!("nope"), json!({ "people": [] }), json!({ "employees": 3 })] {
            let err = parse_collection(value).unwrap_err();
            assert!(matches!(err, SourceError::Malformed(_)));
        }
    }

    #[tokio::test]
    async fn in_memory_source_counts_fetches() {
        let source = InMemorySource::new(vec![json!({ "id": "1" })]);
        let first = source.fetch().await.unwrap();
        let _ = source.fetch().await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(source.fetches(), 2);
    }
}
