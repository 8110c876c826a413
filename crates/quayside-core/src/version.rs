//! Version resolution from a base version and the release signal

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::types::ReleaseChannel;

/// Suffix appended to snapshot versions (hyphen included)
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// The only signal value that selects the release channel, compared case-insensitively
pub const RELEASE_TOKEN: &str = "true";

impl ReleaseChannel {
    /// Channel selected by a release signal.
    ///
    /// Only an exact, case-insensitive match of [`RELEASE_TOKEN`] selects the
    /// release channel. Absent, empty, padded or unknown values all fall back
    /// to snapshot.
    pub fn from_signal(signal: Option<&str>) -> Self {
        match signal {
            Some(value) if value.eq_ignore_ascii_case(RELEASE_TOKEN) => Self::Release,
            _ => Self::Snapshot,
        }
    }
}

/// A concrete version identifier together with the channel it belongs to
///
/// The snapshot suffix is present if and only if the channel is
/// [`ReleaseChannel::Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionString {
    value: String,
    channel: ReleaseChannel,
}

impl VersionString {
    /// Parse an already-resolved version string, deriving its channel from the suffix
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        let channel = if value.ends_with(SNAPSHOT_SUFFIX) {
            ReleaseChannel::Snapshot
        } else {
            ReleaseChannel::Release
        };
        Self { value, channel }
    }

    /// The version as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The channel this version belongs to
    pub fn channel(&self) -> ReleaseChannel {
        self.channel
    }

    /// Whether the version carries the snapshot suffix
    pub fn is_snapshot(&self) -> bool {
        self.value.ends_with(SNAPSHOT_SUFFIX)
    }

    /// The version without the snapshot suffix
    pub fn base(&self) -> &str {
        self.value
            .strip_suffix(SNAPSHOT_SUFFIX)
            .unwrap_or(&self.value)
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for VersionString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for VersionString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl Serialize for VersionString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// Derives the version identifier for a build
///
/// Stateless; calling [`VersionResolver::resolve`] twice with the same inputs
/// yields the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionResolver;

impl VersionResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve the version for `base_version` under the given release signal.
    ///
    /// `base_version` is expected to be non-empty and free of the snapshot
    /// suffix; configuration validation enforces that before we get here.
    pub fn resolve(&self, base_version: &str, release_signal: Option<&str>) -> VersionString {
        let channel = ReleaseChannel::from_signal(release_signal);
        let value = match channel {
            ReleaseChannel::Release => base_version.to_string(),
            ReleaseChannel::Snapshot => format!("{}{}", base_version, SNAPSHOT_SUFFIX),
        };
        debug!(base = base_version, version = %value, channel = %channel, "resolved version");
        VersionString { value, channel }
    }
}
