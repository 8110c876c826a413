//! HTTP plumbing shared by the transports
//!
//! Transports talk to the network only through [`HttpSink`], so uploads can
//! be exercised against an in-memory sink in tests.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode};
use tracing::debug;

use quayside_core::credentials::Credentials;

use crate::error::{Result, StoreError};

/// User-Agent sent with every request
pub const QUAYSIDE_USER_AGENT: &str = concat!("quayside/", env!("CARGO_PKG_VERSION"));

/// Minimal HTTP surface needed to publish to a Maven repository
#[async_trait::async_trait]
pub trait HttpSink: Send + Sync {
    /// PUT `body` at `url`
    async fn put(&self, url: &str, body: Vec<u8>, credentials: &Credentials) -> Result<()>;

    /// GET `url`, `None` when the resource does not exist
    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Option<Vec<u8>>>;
}

/// [`HttpSink`] backed by `reqwest`
pub struct ReqwestSink {
    client: Client,
}

impl ReqwestSink {
    /// Create a sink with an optional request timeout in seconds
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(QUAYSIDE_USER_AGENT);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Build the request for `method url` with Basic auth.
    ///
    /// The header is sent even for empty credentials; rejecting them is left
    /// to the repository.
    pub fn build_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        credentials: &Credentials,
    ) -> Result<Request> {
        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, credentials.basic_auth_header());
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, content_type(url))
                .body(body);
        }
        Ok(request.build()?)
    }
}

#[async_trait::async_trait]
impl HttpSink for ReqwestSink {
    async fn put(&self, url: &str, body: Vec<u8>, credentials: &Credentials) -> Result<()> {
        let request = self.build_request(Method::PUT, url, Some(body), credentials)?;
        let response = self.client.execute(request).await.map_err(map_send_error)?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "PUT");
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, message));
        }
        Ok(())
    }

    async fn get(&self, url: &str, credentials: &Credentials) -> Result<Option<Vec<u8>>> {
        let request = self.build_request(Method::GET, url, None, credentials)?;
        let response = self.client.execute(request).await.map_err(map_send_error)?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "GET");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, message));
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }
}

fn map_send_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout(e.to_string())
    } else {
        StoreError::Http(e)
    }
}

fn status_error(status: StatusCode, message: String) -> StoreError {
    StoreError::ApiError {
        status: status.as_u16(),
        message,
    }
}

/// Content type for a repository file, by extension
pub fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("jar") | Some("war") | Some("aar") => "application/java-archive",
        Some("pom") | Some("xml") => "application/xml",
        Some("sha256") | Some("sha512") | Some("sha1") | Some("md5") => "text/plain",
        _ => "application/octet-stream",
    }
}
