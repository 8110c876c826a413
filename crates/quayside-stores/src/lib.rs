//! Quayside Stores - upload transports and repository lookups
//!
//! Publishes packaged bundles to Maven repositories over HTTP and queries
//! Hangar for the latest released version of a project.
//!
//! ## Usage
//!
//! ```ignore
//! use quayside_stores::{MavenRepositoryTransport, UploadOptions, UploadTransport};
//!
//! let transport = MavenRepositoryTransport::with_timeout(Some(300))?;
//! let result = transport.upload(&bundle, &plan.endpoint, &UploadOptions::default()).await?;
//! ```

pub mod client;
pub mod error;
pub mod hangar;
pub mod maven;
pub mod traits;
pub mod types;

pub use client::{HttpSink, ReqwestSink};
pub use error::StoreError;
pub use hangar::{HangarClient, HangarVersion, LatestVersionQuery, HANGAR_PAPER, HANGAR_PAPER_DEV};
pub use maven::{MavenMetadata, MavenRepositoryTransport};
pub use traits::UploadTransport;
pub use types::*;
