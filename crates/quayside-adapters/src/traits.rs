//! Packager trait

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use quayside_core::error::{AdapterError, Result};

use crate::artifacts::{expected_path, Artifact, ArtifactBundle, ArtifactKind};
use crate::maven::PomXml;
use crate::package::{PackageRequest, ValidationResult};

/// Drives an external build tool to produce the files of a publication
pub trait ArtifactPackager: Send + Sync {
    /// Get the packager name (e.g., "gradle", "maven")
    fn name(&self) -> &'static str;

    /// Check if this packager applies to the given path
    fn detect(&self, path: &Path) -> bool;

    /// Get the build file name(s) this packager recognises
    fn manifest_names(&self) -> &[&str];

    /// Directory, relative to the project, the tool writes jars to
    fn default_output_dir(&self) -> &'static str;

    /// Run the build tool so the binary, sources and javadoc jars exist
    fn build(&self, path: &Path, request: &PackageRequest) -> Result<()>;

    /// Check that the project can be packaged for `request`
    fn validate_packagable(&self, path: &Path, request: &PackageRequest) -> Result<ValidationResult> {
        let _ = request;
        let mut result = ValidationResult::pass();
        if !self.detect(path) {
            result.add_error(format!(
                "No {} build file found (expected one of: {})",
                self.name(),
                self.manifest_names().join(", ")
            ));
        }
        Ok(result)
    }

    /// Directory build outputs are collected from
    fn output_dir(&self, path: &Path, request: &PackageRequest) -> PathBuf {
        match &request.options.output_dir {
            Some(dir) => path.join(dir),
            None => path.join(self.default_output_dir()),
        }
    }

    /// POM produced by the project itself, if any, before version rewriting
    fn source_pom(&self, path: &Path, request: &PackageRequest) -> Result<Option<String>> {
        let _ = (path, request);
        Ok(None)
    }

    /// Gather build outputs and write the POM for `request`
    fn collect(&self, path: &Path, request: &PackageRequest) -> Result<ArtifactBundle> {
        let identity = &request.identity;
        let options = &request.options;
        let dir = self.output_dir(path, request);
        debug!(packager = self.name(), dir = %dir.display(), "collecting artifacts");

        let mut kinds = vec![ArtifactKind::Binary];
        if options.sources {
            kinds.push(ArtifactKind::Sources);
        }
        if options.javadoc {
            kinds.push(ArtifactKind::Javadoc);
        }

        let mut bundle = ArtifactBundle::new(identity.clone());
        for kind in kinds {
            let extension = match kind {
                ArtifactKind::Binary => options.packaging.as_str(),
                _ => "jar",
            };
            let file = expected_path(&dir, identity, kind, extension);
            if !file.exists() {
                return Err(AdapterError::ArtifactNotFound(file).into());
            }
            bundle = bundle.with_artifact(Artifact::from_file(file, kind, extension)?);
        }

        let pom_path = expected_path(&dir, identity, ArtifactKind::Pom, "pom");
        let pom = match self.source_pom(path, request)? {
            Some(content) => PomXml::publishable(&content, identity)?,
            None => {
                warn!(
                    packager = self.name(),
                    "project produced no POM, publishing one without dependencies"
                );
                PomXml::render(
                    identity,
                    &options.packaging,
                    options.description.as_deref(),
                    options.url.as_deref(),
                )
            }
        };
        std::fs::write(&pom_path, pom).map_err(AdapterError::Io)?;
        bundle = bundle.with_artifact(Artifact::from_file(pom_path, ArtifactKind::Pom, "pom")?);

        info!(
            packager = self.name(),
            coordinates = %identity.coordinates(),
            files = bundle.artifacts.len(),
            bytes = bundle.total_size(),
            "collected artifacts"
        );
        Ok(bundle)
    }

    /// Build (unless skipped) and collect
    fn package(&self, path: &Path, request: &PackageRequest) -> Result<ArtifactBundle> {
        if request.options.skip_build {
            info!(packager = self.name(), "skipping build, reusing existing outputs");
        } else {
            self.build(path, request)?;
        }
        self.collect(path, request)
    }
}
