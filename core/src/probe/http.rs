use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

use webdeck_common::config::{PROBE_TIMEOUT, USER_AGENT};
use webdeck_common::error::FetchError;
use webdeck_common::http::PageFetcher;

/// [`PageFetcher`] backed by a shared `reqwest` client.
///
/// Requests go straight to the target, never through a proxy from the
/// environment. Redirects follow reqwest's default policy and TLS
/// certificates are verified, so self-signed HTTPS endpoints do not qualify.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn content_type(&self, url: &str) -> Result<Option<String>, FetchError> {
        let response: Response = self.get(url).await?;
        Ok(response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned))
    }

    async fn document(&self, url: &str) -> Result<String, FetchError> {
        let response: Response = self.get(url).await?;
        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    let url: String = url.to_string();
    if e.is_timeout() {
        FetchError::Timeout { url }
    } else if e.is_builder() {
        FetchError::InvalidUrl { url }
    } else if e.is_body() || e.is_decode() {
        FetchError::Body {
            url,
            reason: e.to_string(),
        }
    } else {
        FetchError::Connect {
            url,
            reason: e.to_string(),
        }
    }
}
