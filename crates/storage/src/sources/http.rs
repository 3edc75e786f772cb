use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::repository::{RecordSource, SourceError, parse_collection};

/// Sends `request` and parses a successful JSON body into a record collection.
pub(crate) async fn fetch_collection(
    request: RequestBuilder,
    url: &Url,
) -> Result<Vec<Value>, SourceError> {
    let response = request.header(ACCEPT, "application/json").send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SourceError::HttpStatus {
            url: url.to_string(),
            status,
            body,
        });
    }
    let value: Value = serde_json::from_str(&body)?;
    parse_collection(value)
}

/// Fetches the directory from a plain JSON endpoint, e.g. `/api/get-employees`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` if `url` does not parse.
    pub fn new(url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::new(),
            url: Url::parse(url)?,
        })
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        fetch_collection(self.client.get(self.url.clone()), &self.url).await
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}
