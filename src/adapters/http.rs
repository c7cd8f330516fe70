use crate::domain::ports::{FetchSettings, PageFetcher};
use crate::utils::error::{MenuError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches restaurant pages over HTTP with a per-attempt timeout and linear
/// backoff between retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    settings: FetchSettings,
}

impl HttpFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        tracing::debug!("{} -> HTTP {}", url, status.as_u16());

        if !status.is_success() {
            return Err(MenuError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))
    }

    /// The client timeout covers the body too, so both phases map it the same way.
    fn transport_error(&self, url: &str, e: reqwest::Error) -> MenuError {
        if e.is_timeout() {
            MenuError::Timeout {
                url: url.to_string(),
                seconds: self.settings.timeout_seconds,
            }
        } else {
            MenuError::Network(e)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let attempts = self.settings.retries + 1;
        let mut attempt = 1;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        "⚠️ Attempt {}/{} failed for {}: {}",
                        attempt,
                        attempts,
                        url,
                        e
                    );
                    tokio::time::sleep(self.settings.retry_delay() * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("❌ Attempt {}/{} failed for {}: {}", attempt, attempts, url, e);
                    return Err(e);
                }
            }
        }
    }
}
