use crate::config::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

/// The GET-and-return-text primitive the expanders are built on.
///
/// Implementations must be safe to share between concurrent expansions.
/// Anything other than a successful body (network error, timeout, non-2xx
/// status) is a [`TransportError`]; the expander does not look at statuses.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, deadline: Option<Instant>)
        -> std::result::Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// [`PageFetcher`] over a pooled `reqwest` client. Clones share the pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &Url,
        deadline: Option<Instant>,
    ) -> std::result::Result<String, TransportError> {
        let mut request = self.client.get(url.clone());

        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TransportError::Timeout {
                    url: url.to_string(),
                });
            }
            request = request.timeout(remaining);
        }

        let response = request.send().await.map_err(|e| classify(url, e))?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Fetched page");

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

fn classify(url: &Url, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.user_agent.starts_with("ariadne/"));
    }

    #[test]
    fn builds_client_from_config() {
        let config = FetcherConfig {
            timeout: Duration::from_millis(250),
            user_agent: "test-agent/1.0".to_string(),
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn expired_deadline_fails_without_network() {
        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:9/w/api.php").unwrap();
        let deadline = Instant::now() - Duration::from_millis(1);

        let err = fetcher.fetch(&url, Some(deadline)).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout { .. }));
    }
}
