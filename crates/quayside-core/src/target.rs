//! Publish target selection

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::RepositoryConfig;
use crate::credentials::Credentials;
use crate::error::{ConfigError, Result};
use crate::types::ReleaseChannel;
use crate::version::VersionString;

/// Authentication scheme attached to an endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// HTTP Basic authentication
    #[default]
    Basic,
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
        }
    }
}

/// Repository an artifact is uploaded to, with the credentials to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryEndpoint {
    /// Repository name
    pub name: String,
    /// Base URL of the repository
    pub url: Url,
    /// Channel this endpoint serves
    pub channel: ReleaseChannel,
    /// Credentials attached to every request
    pub credentials: Credentials,
    /// Authentication scheme
    pub auth_scheme: AuthScheme,
}

impl RepositoryEndpoint {
    /// URL of a path below the repository root
    pub fn resolve(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Picks the release or snapshot repository for a version
#[derive(Debug, Clone)]
pub struct PublishTargetSelector {
    name: String,
    release_url: Url,
    snapshot_url: Url,
}

impl PublishTargetSelector {
    /// Create a selector from explicit URLs
    pub fn new(name: impl Into<String>, release_url: Url, snapshot_url: Url) -> Self {
        Self {
            name: name.into(),
            release_url,
            snapshot_url,
        }
    }

    /// Create a selector from repository configuration
    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        let release_url = parse_url("repository.release.url", &config.release.url)?;
        let snapshot_url = parse_url("repository.snapshot.url", &config.snapshot.url)?;
        Ok(Self::new(&config.name, release_url, snapshot_url))
    }

    /// URL used for a channel
    pub fn url_for(&self, channel: ReleaseChannel) -> &Url {
        match channel {
            ReleaseChannel::Release => &self.release_url,
            ReleaseChannel::Snapshot => &self.snapshot_url,
        }
    }

    /// Select the endpoint for `version`.
    ///
    /// The channel carried by the version decides both the URL and which
    /// credential pair is attached. Empty credentials are passed through
    /// unchanged.
    pub fn select(
        &self,
        version: &VersionString,
        release_credentials: &Credentials,
        snapshot_credentials: &Credentials,
    ) -> RepositoryEndpoint {
        let channel = version.channel();
        let credentials = match channel {
            ReleaseChannel::Release => release_credentials,
            ReleaseChannel::Snapshot => snapshot_credentials,
        };

        let endpoint = RepositoryEndpoint {
            name: self.name.clone(),
            url: self.url_for(channel).clone(),
            channel,
            credentials: credentials.clone(),
            auth_scheme: AuthScheme::Basic,
        };

        debug!(
            version = %version,
            channel = %channel,
            url = %endpoint.url,
            has_credentials = credentials.is_complete(),
            "selected publish target"
        );
        endpoint
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "repository URL is not set".to_string(),
        }
        .into());
    }

    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("invalid URL '{}': {}", value, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("unsupported URL scheme '{}'", url.scheme()),
        }
        .into());
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionResolver;

    const RELEASES: &str = "https://repository.oskarsmc.com/releases";
    const SNAPSHOTS: &str = "https://repository.oskarsmc.com/snapshots";

    fn selector() -> PublishTargetSelector {
        PublishTargetSelector::new(
            "oskarsmc-repository",
            Url::parse(RELEASES).unwrap(),
            Url::parse(SNAPSHOTS).unwrap(),
        )
    }

    fn creds() -> (Credentials, Credentials) {
        (
            Credentials::new("release-user", "release-secret"),
            Credentials::new("snapshot-user", "snapshot-secret"),
        )
    }

    #[test]
    fn test_release_version_selects_release_endpoint() {
        let (release, snapshot) = creds();
        let version = VersionResolver::new().resolve("1.0.0", Some("true"));
        let endpoint = selector().select(&version, &release, &snapshot);

        assert_eq!(version, "1.0.0");
        assert_eq!(endpoint.url.as_str(), RELEASES);
        assert_eq!(endpoint.channel, ReleaseChannel::Release);
        assert_eq!(endpoint.credentials, release);
        assert_eq!(endpoint.auth_scheme, AuthScheme::Basic);
    }

    #[test]
    fn test_absent_signal_selects_snapshot_endpoint() {
        let (release, snapshot) = creds();
        let version = VersionResolver::new().resolve("1.0.0", None);
        let endpoint = selector().select(&version, &release, &snapshot);

        assert_eq!(version, "1.0.0-SNAPSHOT");
        assert_eq!(endpoint.url.as_str(), SNAPSHOTS);
        assert_eq!(endpoint.credentials, snapshot);
    }

    #[test]
    fn test_false_signal_selects_snapshot_endpoint() {
        let (release, snapshot) = creds();
        let version = VersionResolver::new().resolve("1.0.0", Some("false"));
        let endpoint = selector().select(&version, &release, &snapshot);

        assert_eq!(version, "1.0.0-SNAPSHOT");
        assert_eq!(endpoint.url.as_str(), SNAPSHOTS);
    }

    #[test]
    fn test_missing_credentials_still_produce_endpoint() {
        let empty = Credentials::from_parts(None, None);
        let version = VersionResolver::new().resolve("1.0.0", Some("true"));
        let endpoint = selector().select(&version, &empty, &empty);

        assert_eq!(endpoint.credentials.username, "");
        assert_eq!(endpoint.credentials.secret, "");
        assert_eq!(endpoint.auth_scheme, AuthScheme::Basic);
        assert_eq!(endpoint.url.as_str(), RELEASES);
    }

    #[test]
    fn test_endpoint_agrees_with_suffix() {
        let (release, snapshot) = creds();
        let resolver = VersionResolver::new();
        let signals = [None, Some(""), Some("true"), Some("TRUE"), Some("True "), Some("false")];

        for base in ["1.0.0", "0.0.1", "10.4.2-rc.1"] {
            for signal in signals {
                let version = resolver.resolve(base, signal);
                let endpoint = selector().select(&version, &release, &snapshot);
                let is_snapshot_endpoint = endpoint.url.as_str() == SNAPSHOTS;
                assert_eq!(is_snapshot_endpoint, version.as_str().ends_with("-SNAPSHOT"));
            }
        }
    }

    #[test]
    fn test_parsed_snapshot_version_never_targets_releases() {
        let (release, snapshot) = creds();
        let endpoint = selector().select(&VersionString::parse("4.0.0-SNAPSHOT"), &release, &snapshot);
        assert_eq!(endpoint.url.as_str(), SNAPSHOTS);
    }

    #[test]
    fn test_from_config_rejects_missing_url() {
        let config = RepositoryConfig::default();
        assert!(PublishTargetSelector::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_rejects_non_http_scheme() {
        let mut config = RepositoryConfig::default();
        config.release.url = "ftp://example.com/releases".to_string();
        config.snapshot.url = SNAPSHOTS.to_string();
        assert!(PublishTargetSelector::from_config(&config).is_err());
    }

    #[test]
    fn test_endpoint_resolve_joins_paths() {
        let (release, snapshot) = creds();
        let version = VersionResolver::new().resolve("1.0.0", Some("true"));
        let endpoint = selector().select(&version, &release, &snapshot);
        assert_eq!(
            endpoint.resolve("/com/oskarsmc/version/1.0.0/version-1.0.0.jar"),
            "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.jar"
        );
    }
}
