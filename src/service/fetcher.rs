//! Bounded-retry HTTP fetching.
//!
//! Every network call in the pipeline goes through [`Fetcher::fetch`].
//! The post-success rate-limit delay is part of the contract: it bounds
//! the request rate to the origin server, so it happens before control
//! returns to the caller, not as a courtesy the caller may skip.

use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
    rate_limit_delay: Duration,
}

impl Fetcher {
    pub fn new(client: Client, config: &ScrapeConfig) -> Self {
        Self {
            client,
            // A request is always attempted at least once.
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay,
            rate_limit_delay: config.rate_limit_delay,
        }
    }

    /// Fetch a page body, retrying transport and HTTP-status failures.
    ///
    /// At most `max_retries` attempts total, with `retry_delay` between
    /// them. Exactly one of a body or [`ScrapeError::Fetch`] comes back
    /// per invocation.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_body(url).await {
                Ok(body) => {
                    log::trace!("[FETCH] {} ({} bytes, attempt {})", url, body.len(), attempt);
                    sleep(self.rate_limit_delay).await;
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries => {
                    log::warn!(
                        "[FETCH] Attempt {}/{} failed for {}: {}",
                        attempt,
                        self.max_retries,
                        url,
                        e
                    );
                    log::info!("[FETCH] Retrying in {:?}...", self.retry_delay);
                    sleep(self.retry_delay).await;
                }
                Err(e) => {
                    log::warn!("[FETCH] Max retry attempts reached for {}", url);
                    return Err(ScrapeError::Fetch {
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }

    async fn get_body(&self, url: &Url) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(server_url: &str, max_retries: u32) -> ScrapeConfig {
        ScrapeConfig {
            base_url: Url::parse(server_url).unwrap(),
            search_url: Url::parse(&format!("{server_url}/search?")).unwrap(),
            max_retries,
            retry_delay: Duration::ZERO,
            rate_limit_delay: Duration::ZERO,
            results_per_page: 30,
        }
    }

    fn test_fetcher(server_url: &str, max_retries: u32) -> Fetcher {
        let client = crate::service::http::create_client().unwrap();
        Fetcher::new(client, &test_config(server_url, max_retries))
    }

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipe")
            .with_status(200)
            .with_body("<html>ok</html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url(), 3);
        let url = Url::parse(&format!("{}/recipe", server.url())).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_retries_transient_failures() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("GET", "/recipe")
            .with_status(500)
            .expect(2)
            .create_async()
            .await;
        let ok = server
            .mock("GET", "/recipe")
            .with_status(200)
            .with_body("recovered")
            .expect(1)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url(), 3);
        let url = Url::parse(&format!("{}/recipe", server.url())).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "recovered");
        failing.assert_async().await;
        ok.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_fails_after_exhausting_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipe")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url(), 3);
        let url = Url::parse(&format!("{}/recipe", server.url())).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        match err {
            ScrapeError::Fetch { attempts, url: u, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(u, url.to_string());
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn zero_configured_retries_still_attempts_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipe")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url(), 0);
        let url = Url::parse(&format!("{}/recipe", server.url())).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { attempts: 1, .. }));
        mock.assert_async().await;
    }
}
