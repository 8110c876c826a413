//! Error types for Quayside

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using QuaysideError
pub type Result<T> = std::result::Result<T, QuaysideError>;

/// Main error type for Quayside operations
#[derive(Debug, Error)]
pub enum QuaysideError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Adapter-related errors
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Configuration file already exists
    #[error("Configuration file already exists at {0}")]
    AlreadyExists(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter-related errors
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Failed to parse a build file
    #[error("Failed to parse manifest: {0}")]
    ManifestParseError(String),

    /// No adapter recognises the project
    #[error("No packager found for project at {0}")]
    NoPackager(PathBuf),

    /// Unsupported build tool
    #[error("Unsupported build tool: {0}")]
    UnsupportedTool(String),

    /// Expected build output is missing
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    /// Command execution failed
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
