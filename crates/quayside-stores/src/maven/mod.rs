//! Maven repository transport
//!
//! Publishes a bundle by PUTting every file into the standard repository
//! layout, followed by checksum sidecars and the artifact-level
//! `maven-metadata.xml`. Files are uploaded one at a time in bundle order.

mod checksum;
pub mod layout;
mod metadata;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use quayside_adapters::ArtifactBundle;
use quayside_core::target::RepositoryEndpoint;

use crate::client::{HttpSink, ReqwestSink};
use crate::error::{Result, StoreError};
use crate::traits::UploadTransport;
use crate::types::{UploadOptions, UploadResult, UploadedFile};

pub use checksum::{checksum_files, ChecksumAlgorithm};
pub use metadata::MavenMetadata;

/// Uploads bundles to a Maven repository over HTTP
pub struct MavenRepositoryTransport {
    sink: Arc<dyn HttpSink>,
}

impl MavenRepositoryTransport {
    /// Create a transport over any sink
    pub fn new(sink: Arc<dyn HttpSink>) -> Self {
        Self { sink }
    }

    /// Create a transport backed by `reqwest`
    pub fn with_timeout(timeout_secs: Option<u64>) -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestSink::new(timeout_secs)?)))
    }

    async fn put_file(
        &self,
        endpoint: &RepositoryEndpoint,
        path: String,
        content: Vec<u8>,
        options: &UploadOptions,
        uploaded: &mut Vec<UploadedFile>,
    ) -> Result<()> {
        let sidecars = if options.checksums {
            checksum_files(&path, &content)
        } else {
            Vec::new()
        };

        for (path, content) in std::iter::once((path, content)).chain(sidecars) {
            let url = endpoint.resolve(&path);
            let size = content.len() as u64;
            if options.dry_run {
                debug!(url = %url, size, "dry run, not uploading");
            } else {
                debug!(url = %url, size, "uploading");
                self.sink.put(&url, content, &endpoint.credentials).await?;
            }
            uploaded.push(UploadedFile { path, url, size });
        }
        Ok(())
    }

    async fn update_metadata(
        &self,
        bundle: &ArtifactBundle,
        endpoint: &RepositoryEndpoint,
        options: &UploadOptions,
        uploaded: &mut Vec<UploadedFile>,
    ) -> Result<()> {
        let identity = &bundle.identity;
        let path = layout::metadata_path(identity);
        let url = endpoint.resolve(&path);

        let existing = if options.dry_run {
            None
        } else {
            self.sink.get(&url, &endpoint.credentials).await?
        };

        let mut metadata = match existing {
            Some(bytes) => MavenMetadata::parse(&String::from_utf8_lossy(&bytes), identity),
            None => MavenMetadata::new(identity),
        };
        metadata.add_version(&identity.version, Utc::now());
        debug!(versions = metadata.versions.len(), "merged maven-metadata.xml");

        self.put_file(endpoint, path, metadata.render().into_bytes(), options, uploaded)
            .await
    }
}

#[async_trait::async_trait]
impl UploadTransport for MavenRepositoryTransport {
    fn name(&self) -> &str {
        "maven"
    }

    #[instrument(skip_all, fields(
        coordinates = %bundle.identity.coordinates(),
        repository = %endpoint.url,
        dry_run = options.dry_run,
    ))]
    async fn upload(
        &self,
        bundle: &ArtifactBundle,
        endpoint: &RepositoryEndpoint,
        options: &UploadOptions,
    ) -> Result<UploadResult> {
        let identity = &bundle.identity;
        if identity.channel() != endpoint.channel {
            return Err(StoreError::InvalidArtifact(format!(
                "{} is a {} version but the endpoint serves {}",
                identity.coordinates(),
                identity.channel(),
                endpoint.channel
            )));
        }
        bundle.ensure_complete()?;

        let mut warnings = Vec::new();
        if !endpoint.credentials.is_complete() {
            warn!(repository = %endpoint.name, "publishing without complete credentials");
            warnings.push(format!(
                "credentials for {} are incomplete; the repository may reject the upload",
                endpoint.name
            ));
        }

        info!(files = bundle.artifacts.len(), "uploading artifacts");

        let mut uploaded = Vec::new();
        for artifact in &bundle.artifacts {
            let path = layout::artifact_path(identity, artifact);
            let content = artifact.read()?;
            self.put_file(endpoint, path, content, options, &mut uploaded).await?;
        }

        if options.update_metadata {
            self.update_metadata(bundle, endpoint, options, &mut uploaded).await?;
        }

        let result = UploadResult {
            success: true,
            dry_run: options.dry_run,
            coordinates: identity.coordinates(),
            channel: identity.channel(),
            repository: endpoint.url.to_string(),
            files: uploaded,
            warnings,
            uploaded_at: Utc::now(),
        };

        info!(
            files = result.files.len(),
            bytes = result.total_size(),
            "upload complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use quayside_adapters::{Artifact, ArtifactKind};
    use quayside_core::credentials::Credentials;
    use quayside_core::target::PublishTargetSelector;
    use quayside_core::types::ArtifactIdentity;
    use quayside_core::version::VersionResolver;
    use tempfile::TempDir;
    use url::Url;

    #[derive(Default)]
    struct MemorySink {
        puts: Mutex<Vec<(String, Vec<u8>, Credentials)>>,
        existing: HashMap<String, Vec<u8>>,
        fail_with: Option<u16>,
    }

    #[async_trait::async_trait]
    impl HttpSink for MemorySink {
        async fn put(&self, url: &str, body: Vec<u8>, credentials: &Credentials) -> Result<()> {
            if let Some(status) = self.fail_with {
                return Err(StoreError::ApiError {
                    status,
                    message: "rejected".to_string(),
                });
            }
            self.puts
                .lock()
                .unwrap()
                .push((url.to_string(), body, credentials.clone()));
            Ok(())
        }

        async fn get(&self, url: &str, _credentials: &Credentials) -> Result<Option<Vec<u8>>> {
            Ok(self.existing.get(url).cloned())
        }
    }

    fn selector() -> PublishTargetSelector {
        PublishTargetSelector::new(
            "oskarsmc-repository",
            Url::parse("https://repository.oskarsmc.com/releases").unwrap(),
            Url::parse("https://repository.oskarsmc.com/snapshots").unwrap(),
        )
    }

    fn bundle(temp: &TempDir, signal: Option<&str>) -> ArtifactBundle {
        let version = VersionResolver::new().resolve("1.0.0", signal);
        let identity = ArtifactIdentity::new("com.oskarsmc", "version", version);

        let jar = temp.path().join("version.jar");
        let pom = temp.path().join("version.pom");
        std::fs::write(&jar, b"PK").unwrap();
        std::fs::write(&pom, b"<project/>").unwrap();

        ArtifactBundle::new(identity)
            .with_artifact(Artifact::from_file(&jar, ArtifactKind::Binary, "jar").unwrap())
            .with_artifact(Artifact::from_file(&pom, ArtifactKind::Pom, "pom").unwrap())
    }

    fn endpoint_for(bundle: &ArtifactBundle) -> RepositoryEndpoint {
        let credentials = Credentials::new("deployer", "hunter2");
        selector().select(&bundle.identity.version, &credentials, &credentials)
    }

    #[tokio::test]
    async fn test_release_upload_layout() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, Some("true"));
        let endpoint = endpoint_for(&bundle);
        let sink = Arc::new(MemorySink::default());
        let transport = MavenRepositoryTransport::new(sink.clone());

        let result = transport
            .upload(&bundle, &endpoint, &UploadOptions::default())
            .await
            .unwrap();

        let puts = sink.puts.lock().unwrap();
        let urls: Vec<&str> = puts.iter().map(|(u, _, _)| u.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.jar",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.jar.sha256",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.jar.sha512",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.pom",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.pom.sha256",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/1.0.0/version-1.0.0.pom.sha512",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/maven-metadata.xml",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/maven-metadata.xml.sha256",
                "https://repository.oskarsmc.com/releases/com/oskarsmc/version/maven-metadata.xml.sha512",
            ]
        );
        assert_eq!(puts[0].1, b"PK".to_vec());
        assert_eq!(puts[0].2.username, "deployer");
        assert!(result.success);
        assert!(result.warnings.is_empty());
        assert_eq!(result.coordinates, "com.oskarsmc:version:1.0.0");
    }

    #[tokio::test]
    async fn test_snapshot_goes_to_snapshot_repository() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, None);
        let endpoint = endpoint_for(&bundle);
        let sink = Arc::new(MemorySink::default());
        let transport = MavenRepositoryTransport::new(sink.clone());

        let options = UploadOptions {
            checksums: false,
            update_metadata: false,
            ..UploadOptions::default()
        };
        transport.upload(&bundle, &endpoint, &options).await.unwrap();

        let puts = sink.puts.lock().unwrap();
        assert_eq!(puts.len(), 2);
        assert_eq!(
            puts[0].0,
            "https://repository.oskarsmc.com/snapshots/com/oskarsmc/version/1.0.0-SNAPSHOT/version-1.0.0-SNAPSHOT.jar"
        );
    }

    #[tokio::test]
    async fn test_metadata_merges_existing_versions() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, Some("true"));
        let endpoint = endpoint_for(&bundle);

        let mut existing = HashMap::new();
        existing.insert(
            "https://repository.oskarsmc.com/releases/com/oskarsmc/version/maven-metadata.xml".to_string(),
            b"<metadata><versioning><versions><version>0.9.0</version></versions></versioning></metadata>"
                .to_vec(),
        );
        let sink = Arc::new(MemorySink {
            existing,
            ..MemorySink::default()
        });
        let transport = MavenRepositoryTransport::new(sink.clone());

        let options = UploadOptions {
            checksums: false,
            ..UploadOptions::default()
        };
        transport.upload(&bundle, &endpoint, &options).await.unwrap();

        let puts = sink.puts.lock().unwrap();
        let (_, body, _) = puts.last().unwrap();
        let xml = String::from_utf8(body.clone()).unwrap();
        assert!(xml.contains("<version>0.9.0</version>"));
        assert!(xml.contains("<release>1.0.0</release>"));
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_requests() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, Some("true"));
        let endpoint = endpoint_for(&bundle);
        let sink = Arc::new(MemorySink::default());
        let transport = MavenRepositoryTransport::new(sink.clone());

        let options = UploadOptions {
            dry_run: true,
            ..UploadOptions::default()
        };
        let result = transport.upload(&bundle, &endpoint, &options).await.unwrap();

        assert!(sink.puts.lock().unwrap().is_empty());
        assert!(result.dry_run);
        assert_eq!(result.files.len(), 9);
    }

    #[tokio::test]
    async fn test_rejects_mismatched_endpoint() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, None);
        let release = VersionResolver::new().resolve("1.0.0", Some("true"));
        let endpoint = selector().select(&release, &Credentials::default(), &Credentials::default());

        let transport = MavenRepositoryTransport::new(Arc::new(MemorySink::default()));
        let err = transport
            .upload(&bundle, &endpoint, &UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArtifact(_)));
    }

    #[tokio::test]
    async fn test_status_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, Some("true"));
        let endpoint = endpoint_for(&bundle);
        let sink = Arc::new(MemorySink {
            fail_with: Some(401),
            ..MemorySink::default()
        });

        let err = MavenRepositoryTransport::new(sink)
            .upload(&bundle, &endpoint, &UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ApiError { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_credentials_warns() {
        let temp = TempDir::new().unwrap();
        let bundle = bundle(&temp, None);
        let endpoint = selector().select(
            &bundle.identity.version,
            &Credentials::default(),
            &Credentials::default(),
        );
        let sink = Arc::new(MemorySink::default());

        let result = MavenRepositoryTransport::new(sink.clone())
            .upload(&bundle, &endpoint, &UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(sink.puts.lock().unwrap()[0].2.username, "");
    }
}
