use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::http::fetch_collection;
use crate::repository::{RecordSource, SourceError};

const DEFAULT_GATEWAY: &str = "https://api.bamboohr.com/api/gateway.php/";

/// BambooHR employee directory (`employees/directory`).
///
/// Authenticates with HTTP basic auth: the API key as user name and `x` as
/// password.
#[derive(Clone)]
pub struct BambooSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl BambooSource {
    /// Source for `subdomain` on the public BambooHR gateway.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` if the subdomain produces an invalid URL.
    pub fn new(subdomain: &str, api_key: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_gateway(DEFAULT_GATEWAY, subdomain, api_key)
    }

    /// Source against an alternative gateway base URL.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` if the gateway is invalid or the subdomain
    /// is blank or holds anything besides ASCII letters, digits and `-`.
    pub fn with_gateway(
        gateway: &str,
        subdomain: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let mut gateway = gateway.trim().to_string();
        if !gateway.ends_with('/') {
            gateway.push('/');
        }
        let subdomain = subdomain.trim();
        if subdomain.is_empty() {
            return Err(SourceError::InvalidUrl(url::ParseError::EmptyHost));
        }
        // Company subdomains are a single path segment.
        if !subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(SourceError::InvalidUrl(
                url::ParseError::InvalidDomainCharacter,
            ));
        }
        let endpoint =
            Url::parse(&gateway)?.join(&format!("{subdomain}/v1/employees/directory"))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key: api_key.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for BambooSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BambooSource")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RecordSource for BambooSource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .basic_auth(&self.api_key, Some("x"));
        fetch_collection(request, &self.endpoint).await
    }

    fn describe(&self) -> String {
        format!("bamboohr {}", self.endpoint)
    }
}
