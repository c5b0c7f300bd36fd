use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{MflError, Result};

/// A single GET against the league host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Endpoint URL without query string
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Value for the `Cookie` header, if the session is authenticated
    pub cookie: Option<String>,
}

impl GetRequest {
    pub fn new(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        GetRequest {
            url: url.into(),
            query,
            cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Value of a query parameter, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Seam between the league client and the network.
///
/// Returns the response body of a successful request.  Non-success statuses
/// and network failures come back as [`MflError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &GetRequest) -> Result<String>;
}

/// reqwest-backed transport used in production.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mfl-league-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpTransport { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &GetRequest) -> Result<String> {
        debug!(
            "GET {} (TYPE={})",
            request.url,
            request.param("TYPE").unwrap_or("-")
        );

        let mut builder = self.http.get(&request.url).query(&request.query);
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let resp = builder.send().await?;
        if !resp.status().is_success() {
            return Err(MflError::transport(format!(
                "HTTP {} from {}",
                resp.status(),
                request.url
            )));
        }

        Ok(resp.text().await?)
    }
}
