//! Publish planning: identity and destination for one invocation

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::credentials::EnvironmentInputs;
use crate::error::Result;
use crate::target::{PublishTargetSelector, RepositoryEndpoint};
use crate::types::{ArtifactIdentity, ReleaseChannel};
use crate::version::VersionResolver;

/// Everything the packager and the transport need for one publish
#[derive(Debug, Clone, Serialize)]
pub struct PublishPlan {
    /// Identity handed to the packager
    pub identity: ArtifactIdentity,
    /// Destination handed to the transport
    pub endpoint: RepositoryEndpoint,
}

impl PublishPlan {
    /// Channel shared by the identity and the endpoint
    pub fn channel(&self) -> ReleaseChannel {
        self.identity.channel()
    }
}

/// Builds [`PublishPlan`]s from configuration and captured inputs
pub struct PublishPlanner<'a> {
    config: &'a Config,
    resolver: VersionResolver,
}

impl<'a> PublishPlanner<'a> {
    /// Create a new planner
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            resolver: VersionResolver::new(),
        }
    }

    /// Resolve the artifact identity for a release signal
    pub fn identity(&self, release_signal: Option<&str>) -> ArtifactIdentity {
        let project = &self.config.project;
        let version = self.resolver.resolve(project.version.trim(), release_signal);
        ArtifactIdentity::new(&project.group, &project.artifact, version)
    }

    /// Resolve the identity and select its repository endpoint
    pub fn plan(&self, inputs: &EnvironmentInputs) -> Result<PublishPlan> {
        let identity = self.identity(inputs.release_signal.as_deref());
        let selector = PublishTargetSelector::from_config(&self.config.repository)?;
        let endpoint = selector.select(
            &identity.version,
            &inputs.release_credentials,
            &inputs.snapshot_credentials,
        );

        info!(
            coordinates = %identity.coordinates(),
            channel = %identity.channel(),
            repository = %endpoint.url,
            "planned publish"
        );

        Ok(PublishPlan { identity, endpoint })
    }
}
