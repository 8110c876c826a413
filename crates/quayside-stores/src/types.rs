//! Common types for uploads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quayside_core::config::PublishConfig;
use quayside_core::types::ReleaseChannel;

/// Upload options for transports
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Dry run - compute destinations but don't upload
    pub dry_run: bool,

    /// Upload `.sha256`/`.sha512` files next to every artifact
    pub checksums: bool,

    /// Merge the version into the artifact-level `maven-metadata.xml`
    pub update_metadata: bool,

    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            checksums: true,
            update_metadata: true,
            timeout: None,
        }
    }
}

impl UploadOptions {
    /// Options taken from the `[publish]` section
    pub fn from_config(config: &PublishConfig) -> Self {
        Self {
            dry_run: config.dry_run,
            checksums: config.checksums,
            update_metadata: config.update_metadata,
            timeout: Some(config.timeout_secs),
        }
    }
}

/// One file written to the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Path relative to the repository root
    pub path: String,

    /// Full URL the file was PUT to
    pub url: String,

    /// Size in bytes
    pub size: u64,
}

/// Result of an upload operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    /// Whether upload succeeded
    pub success: bool,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// `group:artifact:version` of the publication
    pub coordinates: String,

    /// Channel the publication went to
    pub channel: ReleaseChannel,

    /// Repository base URL
    pub repository: String,

    /// Files written, in upload order
    pub files: Vec<UploadedFile>,

    /// Any warnings from the upload
    pub warnings: Vec<String>,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

impl UploadResult {
    /// Total bytes written
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
