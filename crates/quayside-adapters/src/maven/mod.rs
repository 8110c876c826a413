//! Maven packager
//!
//! Supports Java/Kotlin projects built with Maven. The resolved version is
//! handed over as `-Drevision`, so projects declaring `${revision}` as their
//! version pick it up without the pom.xml being rewritten.

mod pom;

use std::path::{Path, PathBuf};

use tracing::debug;

use quayside_core::error::Result;

use crate::command;
use crate::package::{PackageRequest, ValidationResult};
use crate::traits::ArtifactPackager;

pub use pom::{escape_xml, Parent, PomXml};

/// Maven packager
pub struct MavenAdapter;

impl MavenAdapter {
    /// Create a new Maven adapter
    pub fn new() -> Self {
        Self
    }

    /// Get the pom.xml path
    fn manifest_path(&self, path: &Path) -> PathBuf {
        path.join("pom.xml")
    }

    /// Goals and flags for a request
    pub fn build_args(&self, request: &PackageRequest) -> Vec<String> {
        let mut args = vec!["-B".to_string(), "package".to_string()];
        if request.options.sources {
            args.push("source:jar".to_string());
        }
        if request.options.javadoc {
            args.push("javadoc:jar".to_string());
        }
        args.push("-DskipTests".to_string());
        args.push(format!("-Drevision={}", request.identity.version));
        args
    }
}

impl Default for MavenAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactPackager for MavenAdapter {
    fn name(&self) -> &'static str {
        "maven"
    }

    fn detect(&self, path: &Path) -> bool {
        let found = self.manifest_path(path).exists();
        debug!(adapter = "maven", path = %path.display(), found, "detecting project");
        found
    }

    fn manifest_names(&self) -> &[&str] {
        &["pom.xml"]
    }

    fn default_output_dir(&self) -> &'static str {
        "target"
    }

    fn build(&self, path: &Path, request: &PackageRequest) -> Result<()> {
        let mvn = command::wrapper_or(path, "mvnw", "mvn");
        command::run(path, mvn, &self.build_args(request))
    }

    fn source_pom(&self, path: &Path, _request: &PackageRequest) -> Result<Option<String>> {
        let manifest_path = self.manifest_path(path);
        if !manifest_path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(manifest_path)?))
    }

    fn validate_packagable(&self, path: &Path, request: &PackageRequest) -> Result<ValidationResult> {
        debug!(adapter = "maven", path = %path.display(), "validating packagable");
        let mut result = ValidationResult::pass();

        let manifest_path = self.manifest_path(path);
        if !manifest_path.exists() {
            result.add_error("pom.xml not found");
            return Ok(result);
        }

        let pom = match PomXml::load(&manifest_path) {
            Ok(p) => p,
            Err(e) => {
                result.add_error(format!("Cannot parse pom.xml: {}", e));
                return Ok(result);
            }
        };

        let identity = &request.identity;

        match pom.artifact_id.as_deref() {
            None => result.add_error("artifactId is not set"),
            Some(id) if id != identity.artifact_id => result.add_warning(format!(
                "pom.xml artifactId '{}' differs from configured '{}'; the built jar name will not match",
                id, identity.artifact_id
            )),
            Some(_) => {}
        }

        if let Some(group) = pom.group_id.as_deref() {
            if group != identity.group_id {
                result.add_warning(format!(
                    "pom.xml groupId '{}' differs from configured '{}'",
                    group, identity.group_id
                ));
            }
        }

        if !pom.uses_revision_property() {
            let base = identity.version.base();
            match pom.version.as_deref() {
                Some(v) if v == identity.version.as_str() => {}
                Some(v) if v == base => result.add_warning(format!(
                    "pom.xml version '{}' is fixed; use ${{revision}} so the {} build carries the resolved version",
                    v,
                    identity.channel()
                )),
                Some(v) => result.add_warning(format!(
                    "pom.xml version '{}' does not match resolved version '{}'",
                    v, identity.version
                )),
                None => result.add_error("version is not set"),
            }
        }

        Ok(result)
    }
}
