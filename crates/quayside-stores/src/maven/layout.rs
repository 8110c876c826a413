//! Maven repository layout

use quayside_adapters::Artifact;
use quayside_core::types::ArtifactIdentity;

/// Name of the artifact-level metadata file
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// `com/oskarsmc/version`, the directory holding every version of an artifact
pub fn artifact_root(identity: &ArtifactIdentity) -> String {
    format!("{}/{}", identity.group_id.replace('.', "/"), identity.artifact_id)
}

/// `com/oskarsmc/version/1.0.0`, the directory of one version
pub fn version_dir(identity: &ArtifactIdentity) -> String {
    format!("{}/{}", artifact_root(identity), identity.version)
}

/// Repository path of an artifact file
pub fn artifact_path(identity: &ArtifactIdentity, artifact: &Artifact) -> String {
    format!("{}/{}", version_dir(identity), artifact.remote_name(identity))
}

/// Repository path of the artifact-level metadata
pub fn metadata_path(identity: &ArtifactIdentity) -> String {
    format!("{}/{}", artifact_root(identity), METADATA_FILE)
}
