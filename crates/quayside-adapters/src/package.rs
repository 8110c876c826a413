//! Packaging requests and validation results

use std::path::PathBuf;

use serde::Serialize;

use quayside_core::config::Config;
use quayside_core::types::ArtifactIdentity;

/// Options controlling what a packager produces
#[derive(Debug, Clone, Serialize)]
pub struct PackageOptions {
    /// Packaging type of the main artifact
    pub packaging: String,
    /// Produce a sources jar
    pub sources: bool,
    /// Produce a javadoc jar
    pub javadoc: bool,
    /// Override for the build output directory, relative to the project
    pub output_dir: Option<PathBuf>,
    /// Reuse existing build outputs instead of invoking the build tool
    pub skip_build: bool,
    /// Description for the generated POM
    pub description: Option<String>,
    /// Project URL for the generated POM
    pub url: Option<String>,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            packaging: "jar".to_string(),
            sources: true,
            javadoc: true,
            output_dir: None,
            skip_build: false,
            description: None,
            url: None,
        }
    }
}

impl PackageOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options taken from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            packaging: config.package.packaging.clone(),
            sources: config.package.sources,
            javadoc: config.package.javadoc,
            output_dir: config.package.output_dir.clone(),
            skip_build: false,
            description: config.project.description.clone(),
            url: config.project.url.clone(),
        }
    }

    /// Set whether the build step is skipped
    pub fn skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    /// Set whether sources are produced
    pub fn sources(mut self, sources: bool) -> Self {
        self.sources = sources;
        self
    }

    /// Set whether javadoc is produced
    pub fn javadoc(mut self, javadoc: bool) -> Self {
        self.javadoc = javadoc;
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// What to package: the identity plus options
#[derive(Debug, Clone, Serialize)]
pub struct PackageRequest {
    /// Identity the build must produce
    pub identity: ArtifactIdentity,
    /// Packaging options
    pub options: PackageOptions,
}

impl PackageRequest {
    /// Create a new request
    pub fn new(identity: ArtifactIdentity, options: PackageOptions) -> Self {
        Self { identity, options }
    }
}

/// Result of a pre-packaging validation check
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub passed: bool,
    /// Error messages (if any)
    pub errors: Vec<String>,
    /// Warning messages (if any)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a passing validation result
    pub fn pass() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failing validation result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.passed = false;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.passed {
            self.passed = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.package.javadoc = false;
        config.project.description = Some("A library".to_string());

        let options = PackageOptions::from_config(&config);
        assert!(options.sources);
        assert!(!options.javadoc);
        assert_eq!(options.description.as_deref(), Some("A library"));
        assert!(!options.skip_build);
    }

    #[test]
    fn test_options_builder() {
        let options = PackageOptions::new()
            .skip_build(true)
            .sources(false)
            .output_dir("out");
        assert!(options.skip_build);
        assert!(!options.sources);
        assert_eq!(options.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::pass();
        result.add_warning("Minor issue");
        assert!(result.passed);

        result.add_error("Major issue");
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::pass();
        result.merge(ValidationResult::fail("broken"));
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["broken".to_string()]);
    }
}
