//! Hangar version lookups
//!
//! Queries a Hangar instance for the most recent version of a project, e.g.
//! to tell users of a plugin that an update is available.

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::client::QUAYSIDE_USER_AGENT;
use crate::error::{Result, StoreError};

/// PaperMC's official Hangar instance
pub const HANGAR_PAPER: &str = "https://hangar.papermc.io/";

/// PaperMC's development Hangar instance
pub const HANGAR_PAPER_DEV: &str = "https://hangar.papermc.dev/";

/// A published version of a Hangar project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangarVersion {
    /// Version name, e.g. `1.2.0`
    pub name: String,
    /// Publication time
    pub created_at: DateTime<Utc>,
    /// Changelog, usually Markdown
    #[serde(default)]
    pub description: Option<String>,
}

/// Filters for a latest-version lookup
#[derive(Debug, Clone, Default)]
pub struct LatestVersionQuery {
    /// Project author
    pub author: String,
    /// Project slug
    pub slug: String,
    /// Release channel on Hangar, e.g. `Release`
    pub channel: Option<String>,
    /// Platform, e.g. `velocity` or `paper`
    pub platform: Option<String>,
    /// Platform version
    pub platform_version: Option<String>,
}

impl LatestVersionQuery {
    /// Query for a project
    pub fn new(author: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Filter by channel
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Filter by platform
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Filter by platform version
    pub fn platform_version(mut self, version: impl Into<String>) -> Self {
        self.platform_version = Some(version.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct VersionsPage {
    result: Vec<HangarVersion>,
}

/// Client for a Hangar instance
pub struct HangarClient {
    base_url: Url,
    client: Client,
}

impl HangarClient {
    /// Client for any Hangar instance
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder().user_agent(QUAYSIDE_USER_AGENT).build()?;
        Ok(Self { base_url, client })
    }

    /// Client for the official PaperMC instance
    pub fn paper() -> Result<Self> {
        Self::new(Url::parse(HANGAR_PAPER)?)
    }

    /// Client for the development PaperMC instance
    pub fn paper_dev() -> Result<Self> {
        Self::new(Url::parse(HANGAR_PAPER_DEV)?)
    }

    /// Base URL of the instance
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the latest-version lookup
    pub fn latest_version_url(&self, query: &LatestVersionQuery) -> Result<Url> {
        if query.author.is_empty() || query.slug.is_empty() {
            return Err(StoreError::Other(
                "Hangar author and slug must not be empty".to_string(),
            ));
        }

        let mut url = self.base_url.join("/api/v1/projects/")?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Other(format!("{} cannot be a Hangar base URL", self.base_url)))?
            .pop_if_empty()
            .push(&query.author)
            .push(&query.slug)
            .push("versions");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", "1").append_pair("offset", "0");
            if let Some(channel) = &query.channel {
                pairs.append_pair("channel", channel);
            }
            if let Some(platform) = &query.platform {
                pairs.append_pair("platform", platform);
            }
            if let Some(platform_version) = &query.platform_version {
                pairs.append_pair("platformVersion", platform_version);
            }
        }
        Ok(url)
    }

    /// Latest version of a project, `None` when nothing matches the filters
    #[instrument(skip_all, fields(author = %query.author, slug = %query.slug))]
    pub async fn latest_version(&self, query: &LatestVersionQuery) -> Result<Option<HangarVersion>> {
        let url = self.latest_version_url(query)?;
        debug!(url = %url, "querying Hangar");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let version = parse_latest(&body)?;
        info!(found = version.is_some(), "Hangar lookup complete");
        Ok(version)
    }
}

/// First entry of a versions page
pub fn parse_latest(body: &str) -> Result<Option<HangarVersion>> {
    let page: VersionsPage = serde_json::from_str(body)?;
    Ok(page.result.into_iter().next())
}
