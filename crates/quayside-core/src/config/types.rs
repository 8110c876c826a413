//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Quayside
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Artifact identity
    pub project: ProjectConfig,

    /// Release signal configuration
    pub release: ReleaseConfig,

    /// Target repositories
    pub repository: RepositoryConfig,

    /// Packaging configuration
    pub package: PackageConfig,

    /// Upload configuration
    pub publish: PublishConfig,
}

/// Artifact identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Group ID
    pub group: String,

    /// Artifact ID
    pub artifact: String,

    /// Base version, without any snapshot suffix
    pub version: String,

    /// Description written into the generated POM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Project URL written into the generated POM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            group: String::new(),
            artifact: String::new(),
            version: "0.1.0".to_string(),
            description: None,
            url: None,
        }
    }
}

/// Release signal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Environment variable holding the release signal
    pub signal_env: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            signal_env: "GRADLE_RELEASE".to_string(),
        }
    }
}

/// Release and snapshot repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository name
    pub name: String,

    /// Repository receiving release versions
    pub release: EndpointConfig,

    /// Repository receiving snapshot versions
    pub snapshot: EndpointConfig,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: "maven".to_string(),
            release: EndpointConfig::default(),
            snapshot: EndpointConfig::default(),
        }
    }
}

/// A single repository endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL
    pub url: String,

    /// Environment variable holding the username
    pub username_env: String,

    /// Environment variable holding the secret
    pub secret_env: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username_env: "MAVEN_USERNAME".to_string(),
            secret_env: "MAVEN_SECRET".to_string(),
        }
    }
}

/// Packaging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Build tool (auto, gradle, maven)
    pub tool: String,

    /// Packaging type of the main artifact
    pub packaging: String,

    /// Whether to produce and upload a sources jar
    pub sources: bool,

    /// Whether to produce and upload a javadoc jar
    pub javadoc: bool,

    /// Directory the build tool writes jars to (tool default if None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            tool: "auto".to_string(),
            packaging: "jar".to_string(),
            sources: true,
            javadoc: true,
            output_dir: None,
        }
    }
}

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Validate and report without uploading
    pub dry_run: bool,

    /// Upload .sha256/.sha512 checksum files next to each artifact
    pub checksums: bool,

    /// Maintain the artifact-level maven-metadata.xml
    pub update_metadata: bool,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            checksums: true,
            update_metadata: true,
            timeout_secs: 300,
        }
    }
}
