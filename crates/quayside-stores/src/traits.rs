//! Upload transport trait

use quayside_adapters::ArtifactBundle;
use quayside_core::target::RepositoryEndpoint;

use crate::error::Result;
use crate::types::{UploadOptions, UploadResult};

/// Trait for transports that publish a packaged bundle
///
/// Implementations upload every file of the bundle to the endpoint chosen
/// for its version. They never pick the endpoint themselves.
#[async_trait::async_trait]
pub trait UploadTransport: Send + Sync {
    /// Get the transport name
    fn name(&self) -> &str;

    /// Upload a bundle to the endpoint
    async fn upload(
        &self,
        bundle: &ArtifactBundle,
        endpoint: &RepositoryEndpoint,
        options: &UploadOptions,
    ) -> Result<UploadResult>;
}
