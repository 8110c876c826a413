//! Packaged artifacts ready for upload
//!
//! Whichever build tool produced them, the files of a publication are
//! represented uniformly so the transport can upload them the same way.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use quayside_core::error::{AdapterError, Result};
use quayside_core::types::ArtifactIdentity;

/// Kind of file in a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// The main binary (usually a jar)
    Binary,
    /// Source bundle
    Sources,
    /// Documentation bundle
    Javadoc,
    /// Project object model
    Pom,
}

impl ArtifactKind {
    /// Maven classifier for this kind, if any
    pub fn classifier(&self) -> Option<&'static str> {
        match self {
            Self::Sources => Some("sources"),
            Self::Javadoc => Some("javadoc"),
            Self::Binary | Self::Pom => None,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Sources => write!(f, "sources"),
            Self::Javadoc => write!(f, "javadoc"),
            Self::Pom => write!(f, "pom"),
        }
    }
}

/// A single file of a publication
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    /// Path to the file on disk
    pub path: PathBuf,
    /// Kind of file
    pub kind: ArtifactKind,
    /// File extension used in the repository (e.g. `jar`, `pom`)
    pub extension: String,
    /// Size in bytes
    pub size: u64,
}

impl Artifact {
    /// Create an artifact from an existing file
    pub fn from_file(path: impl Into<PathBuf>, kind: ArtifactKind, extension: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)
            .map_err(|_| AdapterError::ArtifactNotFound(path.clone()))?;

        Ok(Self {
            path,
            kind,
            extension: extension.into(),
            size: metadata.len(),
        })
    }

    /// File name in the repository, `artifact-version[-classifier].ext`
    pub fn remote_name(&self, identity: &ArtifactIdentity) -> String {
        match self.kind.classifier() {
            Some(classifier) => format!("{}-{}.{}", identity.file_stem(), classifier, self.extension),
            None => format!("{}.{}", identity.file_stem(), self.extension),
        }
    }

    /// Read the file contents
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path).map_err(AdapterError::Io)?)
    }

    /// SHA-256 of the file contents, hex encoded
    pub fn sha256(&self) -> Result<String> {
        let content = self.read()?;
        Ok(format!("{:x}", Sha256::digest(&content)))
    }
}

/// All files produced for one artifact identity
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactBundle {
    /// Identity the files were built for
    pub identity: ArtifactIdentity,
    /// Files in upload order
    pub artifacts: Vec<Artifact>,
}

impl ArtifactBundle {
    /// Create an empty bundle
    pub fn new(identity: ArtifactIdentity) -> Self {
        Self {
            identity,
            artifacts: Vec::new(),
        }
    }

    /// Add an artifact
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Find the artifact of a given kind
    pub fn get(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Total size of all files
    pub fn total_size(&self) -> u64 {
        self.artifacts.iter().map(|a| a.size).sum()
    }

    /// Check the bundle has a binary and a POM
    pub fn ensure_complete(&self) -> Result<()> {
        for kind in [ArtifactKind::Binary, ArtifactKind::Pom] {
            if self.get(kind).is_none() {
                return Err(AdapterError::ArtifactNotFound(PathBuf::from(format!(
                    "{} ({})",
                    self.identity.file_stem(),
                    kind
                )))
                .into());
            }
        }
        Ok(())
    }
}

/// Expected local path of a build output in `dir`
pub fn expected_path(dir: &Path, identity: &ArtifactIdentity, kind: ArtifactKind, extension: &str) -> PathBuf {
    let name = match kind.classifier() {
        Some(classifier) => format!("{}-{}.{}", identity.file_stem(), classifier, extension),
        None => format!("{}.{}", identity.file_stem(), extension),
    };
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quayside_core::version::VersionString;
    use tempfile::TempDir;

    fn identity() -> ArtifactIdentity {
        ArtifactIdentity::new("com.oskarsmc", "version", VersionString::parse("1.0.0-SNAPSHOT"))
    }

    #[test]
    fn test_remote_names() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("a.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let binary = Artifact::from_file(&jar, ArtifactKind::Binary, "jar").unwrap();
        let sources = Artifact::from_file(&jar, ArtifactKind::Sources, "jar").unwrap();
        assert_eq!(binary.remote_name(&identity()), "version-1.0.0-SNAPSHOT.jar");
        assert_eq!(sources.remote_name(&identity()), "version-1.0.0-SNAPSHOT-sources.jar");
        assert_eq!(binary.size, 3);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = Artifact::from_file(temp.path().join("missing.jar"), ArtifactKind::Binary, "jar");
        assert!(result.is_err());
    }

    #[test]
    fn test_sha256() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.jar");
        std::fs::write(&path, b"").unwrap();
        let artifact = Artifact::from_file(&path, ArtifactKind::Binary, "jar").unwrap();
        assert_eq!(
            artifact.sha256().unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_bundle_completeness() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("version-1.0.0-SNAPSHOT.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let bundle = ArtifactBundle::new(identity())
            .with_artifact(Artifact::from_file(&jar, ArtifactKind::Binary, "jar").unwrap());
        assert!(bundle.ensure_complete().is_err());

        let pom = temp.path().join("version-1.0.0-SNAPSHOT.pom");
        std::fs::write(&pom, b"<project/>").unwrap();
        let bundle = bundle.with_artifact(Artifact::from_file(&pom, ArtifactKind::Pom, "pom").unwrap());
        assert!(bundle.ensure_complete().is_ok());
        assert_eq!(bundle.total_size(), 13);
    }

    #[test]
    fn test_expected_path() {
        let path = expected_path(Path::new("build/libs"), &identity(), ArtifactKind::Javadoc, "jar");
        assert_eq!(path, Path::new("build/libs/version-1.0.0-SNAPSHOT-javadoc.jar"));
    }
}
