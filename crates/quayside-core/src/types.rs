//! Core types for Quayside

use serde::{Deserialize, Serialize};

use crate::version::VersionString;

/// Channel an artifact is published to
///
/// This is the single value both the version suffix and the repository
/// endpoint are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// Immutable release version
    Release,
    /// Mutable pre-release version, republishable under the same identifier
    #[default]
    Snapshot,
}

impl ReleaseChannel {
    /// Returns the string representation of the channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Snapshot => "snapshot",
        }
    }

    /// Whether this is the release channel
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release)
    }
}

impl std::fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReleaseChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" | "releases" => Ok(Self::Release),
            "snapshot" | "snapshots" => Ok(Self::Snapshot),
            _ => Err(format!("Unknown release channel: {}", s)),
        }
    }
}

/// Identity of the artifact being published
///
/// Computed once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactIdentity {
    /// Group ID (e.g. `com.oskarsmc`)
    pub group_id: String,
    /// Artifact ID (e.g. `version`)
    pub artifact_id: String,
    /// Resolved version
    pub version: VersionString,
}

impl ArtifactIdentity {
    /// Create a new artifact identity
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: VersionString,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
        }
    }

    /// Channel of the identity's version
    pub fn channel(&self) -> ReleaseChannel {
        self.version.channel()
    }

    /// Maven coordinates in `group:artifact:version` form
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Base file name for artifacts, `artifact-version`
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }
}

impl std::fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_release_channel_from_str() {
        assert_eq!(ReleaseChannel::from_str("release").unwrap(), ReleaseChannel::Release);
        assert_eq!(ReleaseChannel::from_str("SNAPSHOTS").unwrap(), ReleaseChannel::Snapshot);
        assert!(ReleaseChannel::from_str("nightly").is_err());
    }

    #[test]
    fn test_release_channel_defaults_to_snapshot() {
        assert_eq!(ReleaseChannel::default(), ReleaseChannel::Snapshot);
    }

    #[test]
    fn test_identity_coordinates() {
        let identity = ArtifactIdentity::new(
            "com.oskarsmc",
            "version",
            VersionString::parse("1.0.0-SNAPSHOT"),
        );
        assert_eq!(identity.coordinates(), "com.oskarsmc:version:1.0.0-SNAPSHOT");
        assert_eq!(identity.file_stem(), "version-1.0.0-SNAPSHOT");
        assert_eq!(identity.channel(), ReleaseChannel::Snapshot);
    }
}
