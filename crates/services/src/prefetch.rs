//! Fire-and-forget warming of photo URLs for upcoming rounds.

use reqwest::Client;
use tokio::runtime::Handle;
use tracing::debug;

/// Capability to start loading an image without waiting for it.
///
/// Implementations must return immediately; completion is never observed.
pub trait Prefetch: Send + Sync {
    fn prefetch(&self, url: &str);
}

impl<F> Prefetch for F
where
    F: Fn(&str) + Send + Sync,
{
    fn prefetch(&self, url: &str) {
        self(url);
    }
}

/// Does nothing; the headless default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrefetch;

impl Prefetch for NoopPrefetch {
    fn prefetch(&self, _url: &str) {}
}

/// Issues a GET for each URL on a detached tokio task and drops the body.
#[derive(Debug, Clone)]
pub struct HttpPrefetch {
    client: Client,
    handle: Handle,
}

impl HttpPrefetch {
    #[must_use]
    pub fn new(client: Client, handle: Handle) -> Self {
        Self { client, handle }
    }

    /// Prefetcher bound to the runtime the caller is running on, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        Handle::try_current()
            .ok()
            .map(|handle| Self::new(Client::new(), handle))
    }
}

impl Prefetch for HttpPrefetch {
    fn prefetch(&self, url: &str) {
        let request = self.client.get(url);
        let url = url.to_owned();
        self.handle.spawn(async move {
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let _ = response.bytes().await;
                    debug!(%url, %status, "photo prefetched");
                }
                Err(err) => debug!(%url, error = %err, "photo prefetch failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn closures_are_prefetchers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let prefetch = move |url: &str| sink.lock().unwrap().push(url.to_owned());

        prefetch.prefetch("https://img/1.jpg");

        assert_eq!(*seen.lock().unwrap(), vec!["https://img/1.jpg".to_string()]);
    }

    #[test]
    fn no_runtime_means_no_http_prefetcher() {
        assert!(HttpPrefetch::current().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn http_prefetch_requests_photo_in_background() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photos/7.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0_u8; 16]))
            .mount(&server)
            .await;

        let prefetch = HttpPrefetch::current().unwrap();
        prefetch.prefetch(&format!("{}/photos/7.jpg", server.uri()));

        let mut hits = 0;
        for _ in 0..100 {
            hits = server.received_requests().await.map_or(0, |r| r.len());
            if hits > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn unreachable_photo_does_not_panic() {
        let prefetch = HttpPrefetch::current().unwrap();
        prefetch.prefetch("not a url");
        tokio::task::yield_now().await;
    }
}
