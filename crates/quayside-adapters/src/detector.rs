//! Packager selection

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use quayside_core::error::{AdapterError, Result};

use crate::registry::PackagerRegistry;
use crate::traits::ArtifactPackager;

/// Tool name that asks for detection instead of a fixed packager
pub const AUTO_TOOL: &str = "auto";

/// Pick the packager for a project.
///
/// `tool` is either [`AUTO_TOOL`] or the name of a registered packager.
#[instrument(skip(registry), fields(path = %path.display()))]
pub fn select_packager(
    path: &Path,
    tool: &str,
    registry: &PackagerRegistry,
) -> Result<Arc<dyn ArtifactPackager>> {
    let packager = if tool == AUTO_TOOL {
        registry
            .detect(path)
            .ok_or_else(|| AdapterError::NoPackager(path.to_path_buf()))?
    } else {
        registry
            .get(tool)
            .ok_or_else(|| AdapterError::UnsupportedTool(tool.to_string()))?
    };

    debug!(packager = packager.name(), "selected packager");
    Ok(packager)
}

/// Names of packagers that recognise the project
pub fn detect_packagers(path: &Path, registry: &PackagerRegistry) -> Vec<&'static str> {
    registry
        .all()
        .iter()
        .filter(|p| p.detect(path))
        .map(|p| p.name())
        .collect()
}
