//! Quayside Core - versioning and publish-target decisions
//!
//! This crate owns the part of a library release that must never get out of
//! sync: the version identifier derived from the release signal and the
//! repository endpoint the artifact is uploaded to. Both are derived from a
//! single [`ReleaseChannel`], so a release-shaped version can never be paired
//! with the snapshot repository or the other way around.
//!
//! Building and uploading are left to the `quayside-adapters` and
//! `quayside-stores` crates.

pub mod config;
pub mod credentials;
pub mod error;
pub mod target;
pub mod types;
pub mod version;
pub mod workflow;

pub use credentials::{CredentialProvider, Credentials, EnvironmentInputs};
pub use error::{QuaysideError, Result};
pub use target::{AuthScheme, PublishTargetSelector, RepositoryEndpoint};
pub use types::{ArtifactIdentity, ReleaseChannel};
pub use version::{VersionResolver, VersionString, RELEASE_TOKEN, SNAPSHOT_SUFFIX};
pub use workflow::{PublishPlan, PublishPlanner};
