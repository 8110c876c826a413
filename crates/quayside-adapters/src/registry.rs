//! Packager registry

use std::path::Path;
use std::sync::Arc;

use crate::gradle::GradleAdapter;
use crate::maven::MavenAdapter;
use crate::traits::ArtifactPackager;

/// Registry of available packagers
pub struct PackagerRegistry {
    packagers: Vec<Arc<dyn ArtifactPackager>>,
}

impl PackagerRegistry {
    /// Create a new registry with all built-in packagers
    pub fn new() -> Self {
        Self {
            packagers: vec![Arc::new(GradleAdapter::new()), Arc::new(MavenAdapter::new())],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            packagers: Vec::new(),
        }
    }

    /// Register a packager
    pub fn register<P: ArtifactPackager + 'static>(&mut self, packager: P) {
        self.packagers.push(Arc::new(packager));
    }

    /// Get packager by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ArtifactPackager>> {
        self.packagers.iter().find(|p| p.name() == name).cloned()
    }

    /// Detect which packager applies to a path
    pub fn detect(&self, path: &Path) -> Option<Arc<dyn ArtifactPackager>> {
        self.packagers.iter().find(|p| p.detect(path)).cloned()
    }

    /// Get all registered packagers
    pub fn all(&self) -> &[Arc<dyn ArtifactPackager>] {
        &self.packagers
    }

    /// Get packager names
    pub fn names(&self) -> Vec<&'static str> {
        self.packagers.iter().map(|p| p.name()).collect()
    }
}

impl Default for PackagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_packager() {
        let registry = PackagerRegistry::new();
        assert!(registry.get("gradle").is_some());
        assert!(registry.get("maven").is_some());
        assert!(registry.get("npm").is_none());
        assert_eq!(registry.names(), vec!["gradle", "maven"]);
    }

    #[test]
    fn test_gradle_wins_when_both_present() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), "<project/>").unwrap();
        std::fs::write(temp.path().join("build.gradle"), "").unwrap();

        let registry = PackagerRegistry::new();
        assert_eq!(registry.detect(temp.path()).unwrap().name(), "gradle");
    }

    #[test]
    fn test_empty_registry() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), "<project/>").unwrap();

        let mut registry = PackagerRegistry::empty();
        assert!(registry.detect(temp.path()).is_none());

        registry.register(MavenAdapter::new());
        assert_eq!(registry.all().len(), 1);
        assert!(registry.detect(temp.path()).is_some());
    }
}
