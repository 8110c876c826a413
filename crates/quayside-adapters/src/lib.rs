//! Quayside Adapters - build tool packagers
//!
//! Drives Gradle or Maven to produce the binary, sources and javadoc jars of
//! a resolved artifact identity, and writes the POM that accompanies them.

pub mod artifacts;
pub mod command;
pub mod detector;
pub mod gradle;
pub mod maven;
pub mod package;
pub mod registry;
mod traits;

pub use artifacts::{Artifact, ArtifactBundle, ArtifactKind};
pub use detector::{detect_packagers, select_packager, AUTO_TOOL};
pub use gradle::GradleAdapter;
pub use maven::{MavenAdapter, PomXml};
pub use package::{PackageOptions, PackageRequest, ValidationResult};
pub use registry::PackagerRegistry;
pub use traits::ArtifactPackager;
