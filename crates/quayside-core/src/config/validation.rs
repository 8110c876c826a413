//! Configuration validation

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::version::SNAPSHOT_SUFFIX;

use super::types::{Config, EndpointConfig};

/// Build tools accepted in `package.tool`
pub const VALID_TOOLS: [&str; 3] = ["auto", "gradle", "maven"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_project(config)?;
    validate_release(config)?;
    validate_repository(config)?;
    validate_package(config)?;
    validate_publish(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Stricter checks needed before an actual upload
pub fn validate_for_publish(config: &Config) -> Result<()> {
    validate_config(config)?;

    if config.project.group.trim().is_empty() {
        return Err(invalid("project.group", "group cannot be empty"));
    }
    if config.project.artifact.trim().is_empty() {
        return Err(invalid("project.artifact", "artifact cannot be empty"));
    }
    if config.repository.release.url.trim().is_empty() {
        return Err(invalid("repository.release.url", "release repository URL is not set"));
    }
    if config.repository.snapshot.url.trim().is_empty() {
        return Err(invalid("repository.snapshot.url", "snapshot repository URL is not set"));
    }

    Ok(())
}

fn validate_project(config: &Config) -> Result<()> {
    let version = config.project.version.trim();
    if version.is_empty() {
        return Err(invalid("project.version", "version cannot be empty"));
    }

    if version.ends_with(SNAPSHOT_SUFFIX) {
        return Err(invalid(
            "project.version",
            &format!("must not contain the {} suffix; it is added for snapshot builds", SNAPSHOT_SUFFIX),
        ));
    }

    if semver::Version::parse(version).is_err() {
        warn!(version, "project.version is not a semantic version");
    }

    for (field, value) in [
        ("project.group", &config.project.group),
        ("project.artifact", &config.project.artifact),
    ] {
        if value.contains(char::is_whitespace) || value.contains('/') || value.contains(':') {
            return Err(invalid(field, "must not contain whitespace, '/' or ':'"));
        }
    }

    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if config.release.signal_env.trim().is_empty() {
        return Err(invalid("release.signal_env", "variable name cannot be empty"));
    }
    Ok(())
}

fn validate_repository(config: &Config) -> Result<()> {
    if config.repository.name.trim().is_empty() {
        return Err(invalid("repository.name", "name cannot be empty"));
    }
    validate_endpoint("repository.release", &config.repository.release)?;
    validate_endpoint("repository.snapshot", &config.repository.snapshot)?;
    Ok(())
}

fn validate_endpoint(prefix: &str, endpoint: &EndpointConfig) -> Result<()> {
    if !endpoint.url.is_empty() {
        let url = url::Url::parse(&endpoint.url).map_err(|e| ConfigError::InvalidValue {
            field: format!("{}.url", prefix),
            message: format!("invalid URL: {}", e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(&format!("{}.url", prefix), "must be an http(s) URL"));
        }
    }

    if endpoint.username_env.trim().is_empty() {
        return Err(invalid(&format!("{}.username_env", prefix), "variable name cannot be empty"));
    }
    if endpoint.secret_env.trim().is_empty() {
        return Err(invalid(&format!("{}.secret_env", prefix), "variable name cannot be empty"));
    }

    Ok(())
}

fn validate_package(config: &Config) -> Result<()> {
    if !VALID_TOOLS.contains(&config.package.tool.as_str()) {
        return Err(invalid(
            "package.tool",
            &format!("must be one of: {}", VALID_TOOLS.join(", ")),
        ));
    }
    if config.package.packaging.trim().is_empty() {
        return Err(invalid("package.packaging", "packaging cannot be empty"));
    }
    Ok(())
}

fn validate_publish(config: &Config) -> Result<()> {
    if config.publish.timeout_secs == 0 {
        return Err(invalid("publish.timeout_secs", "must be greater than zero"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::QuaysideError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
