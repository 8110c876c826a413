//! Gradle packager
//!
//! Builds Java/Kotlin libraries with Gradle. The resolved version and group
//! are passed as project properties so the jars carry the identity decided
//! by Quayside, not whatever the build script would compute on its own.

use std::path::{Path, PathBuf};

use tracing::debug;

use quayside_core::error::Result;

use crate::command;
use crate::package::{PackageRequest, ValidationResult};
use crate::traits::ArtifactPackager;

const BUILD_FILES: [&str; 2] = ["build.gradle.kts", "build.gradle"];

const SETTINGS_FILES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];

/// Task writing the POM of the `maven` publication
const GENERATE_POM_TASK: &str = "generatePomFileForMavenPublication";

/// Where [`GENERATE_POM_TASK`] writes the POM, relative to the project
const GENERATED_POM: &str = "build/publications/maven/pom-default.xml";

/// Gradle packager
pub struct GradleAdapter;

impl GradleAdapter {
    /// Create a new Gradle adapter
    pub fn new() -> Self {
        Self
    }

    fn build_file(&self, path: &Path) -> Option<PathBuf> {
        BUILD_FILES.iter().map(|f| path.join(f)).find(|p| p.exists())
    }

    /// Gradle tasks and flags for a request
    ///
    /// `generate_pom` adds the task writing the `maven` publication's POM.
    pub fn build_args(&self, request: &PackageRequest, generate_pom: bool) -> Vec<String> {
        let mut args = vec!["assemble".to_string()];
        if request.options.sources {
            args.push("sourcesJar".to_string());
        }
        if request.options.javadoc {
            args.push("javadocJar".to_string());
        }
        if generate_pom {
            args.push(GENERATE_POM_TASK.to_string());
        }
        args.push(format!("-Pversion={}", request.identity.version));
        args.push(format!("-Pgroup={}", request.identity.group_id));
        args.push("--console=plain".to_string());
        args
    }
}

impl Default for GradleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactPackager for GradleAdapter {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn detect(&self, path: &Path) -> bool {
        let found = BUILD_FILES.iter().any(|f| path.join(f).exists());
        debug!(adapter = "gradle", path = %path.display(), found, "detecting project");
        found
    }

    fn manifest_names(&self) -> &[&str] {
        &BUILD_FILES
    }

    fn default_output_dir(&self) -> &'static str {
        "build/libs"
    }

    fn build(&self, path: &Path, request: &PackageRequest) -> Result<()> {
        let generate_pom = match self.build_file(path) {
            Some(file) => declares_maven_publication(&std::fs::read_to_string(file)?),
            None => false,
        };
        let gradle = command::wrapper_or(path, "gradlew", "gradle");
        command::run(path, gradle, &self.build_args(request, generate_pom))
    }

    fn source_pom(&self, path: &Path, _request: &PackageRequest) -> Result<Option<String>> {
        let generated = path.join(GENERATED_POM);
        if !generated.exists() {
            return Ok(None);
        }
        debug!(adapter = "gradle", pom = %generated.display(), "using generated POM");
        Ok(Some(std::fs::read_to_string(generated)?))
    }

    fn validate_packagable(&self, path: &Path, request: &PackageRequest) -> Result<ValidationResult> {
        let mut result = ValidationResult::pass();

        let Some(build_file) = self.build_file(path) else {
            result.add_error("No build.gradle.kts or build.gradle found");
            return Ok(result);
        };

        let content = std::fs::read_to_string(&build_file)?;
        let identity = &request.identity;

        if let Some(version) = assigned_literal(&content, "version") {
            result.add_warning(format!(
                "build script assigns version = \"{}\", which overrides -Pversion; the {} jar will not be named {}",
                version,
                identity.channel(),
                identity.file_stem()
            ));
        }
        if let Some(group) = assigned_literal(&content, "group") {
            if group != identity.group_id {
                result.add_warning(format!(
                    "build script assigns group = \"{}\", which overrides configured '{}'",
                    group, identity.group_id
                ));
            }
        }

        if let Some(settings) = SETTINGS_FILES.iter().map(|f| path.join(f)).find(|p| p.exists()) {
            let settings = std::fs::read_to_string(settings)?;
            if let Some(name) = assigned_literal(&settings, "rootProject.name") {
                if name != identity.artifact_id {
                    result.add_warning(format!(
                        "rootProject.name '{}' differs from configured artifact '{}'; the built jar name will not match",
                        name, identity.artifact_id
                    ));
                }
            }
        }

        if !declares_maven_publication(&content) {
            result.add_warning(
                "build script has no maven-publish \"maven\" publication; the uploaded POM will declare no dependencies",
            );
        }

        if request.options.sources || request.options.javadoc {
            let declares_jars = content.contains("withSourcesJar") || content.contains("withJavadocJar");
            if !declares_jars {
                result.add_warning(
                    "build script does not call withSourcesJar()/withJavadocJar(); sourcesJar/javadocJar tasks may not exist",
                );
            }
        }

        if !path.join("gradlew").exists() {
            result.add_warning("no Gradle wrapper found, using gradle from PATH");
        }

        Ok(result)
    }
}

/// Whether the script creates the `maven` publication the POM task belongs to
fn declares_maven_publication(script: &str) -> bool {
    script.contains("maven-publish")
        && (script.contains("MavenPublication>(\"maven\")")
            || script.contains("maven(MavenPublication)"))
}

/// Value of the first `name = "literal"` assignment in a script.
///
/// Assignments from expressions, like `version = project.version`, are
/// ignored; only string literals can override a `-P` property unnoticed.
fn assigned_literal<'a>(script: &'a str, name: &str) -> Option<&'a str> {
    script.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(name)?.trim_start();
        let value = rest.strip_prefix('=')?.trim();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let inner = &value[1..];
        inner.find(quote).map(|end| &inner[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageOptions;
    use quayside_core::types::ArtifactIdentity;
    use quayside_core::version::VersionResolver;
    use tempfile::TempDir;

    fn request(signal: Option<&str>) -> PackageRequest {
        let version = VersionResolver::new().resolve("1.0.0", signal);
        PackageRequest::new(
            ArtifactIdentity::new("com.oskarsmc", "version", version),
            PackageOptions::new(),
        )
    }

    #[test]
    fn test_detect() {
        let adapter = GradleAdapter::new();
        let temp = TempDir::new().unwrap();
        assert!(!adapter.detect(temp.path()));

        std::fs::write(temp.path().join("build.gradle.kts"), "plugins { id(\"java\") }").unwrap();
        assert!(adapter.detect(temp.path()));
    }

    #[test]
    fn test_build_args_carry_identity() {
        let args = GradleAdapter::new().build_args(&request(None), false);
        assert_eq!(args[0], "assemble");
        assert!(args.contains(&"sourcesJar".to_string()));
        assert!(args.contains(&"javadocJar".to_string()));
        assert!(args.contains(&"-Pversion=1.0.0-SNAPSHOT".to_string()));
        assert!(args.contains(&"-Pgroup=com.oskarsmc".to_string()));
    }

    #[test]
    fn test_build_args_without_extras() {
        let mut req = request(Some("true"));
        req.options = PackageOptions::new().sources(false).javadoc(false);
        let args = GradleAdapter::new().build_args(&req, true);
        assert!(!args.contains(&"sourcesJar".to_string()));
        assert!(args.contains(&GENERATE_POM_TASK.to_string()));
        assert!(args.contains(&"-Pversion=1.0.0".to_string()));
    }

    #[test]
    fn test_validate_warns_without_jar_tasks() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("build.gradle.kts"), "plugins { id(\"java\") }").unwrap();

        let result = GradleAdapter::new()
            .validate_packagable(temp.path(), &request(None))
            .unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 3);
    }

    const PUBLISHING_SCRIPT: &str = r#"plugins {
    id("java")
    id("maven-publish")
}

group = "com.oskarsmc"
version = "1.0.0"

publishing {
    publications {
        create<MavenPublication>("maven") {
            groupId = project.group as String?
            version = project.version as String?
            from(components["java"])
        }
    }
}

java {
    withJavadocJar()
    withSourcesJar()
}
"#;

    #[test]
    fn test_validate_warns_on_fixed_version() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("build.gradle.kts"), PUBLISHING_SCRIPT).unwrap();
        std::fs::write(temp.path().join("gradlew"), "").unwrap();

        let result = GradleAdapter::new()
            .validate_packagable(temp.path(), &request(None))
            .unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("version = \"1.0.0\""));
        assert!(result.warnings[0].contains("version-1.0.0-SNAPSHOT"));
    }

    #[test]
    fn test_validate_warns_on_root_project_name() {
        let temp = TempDir::new().unwrap();
        let script = PUBLISHING_SCRIPT.replace("version = \"1.0.0\"\n", "");
        std::fs::write(temp.path().join("build.gradle.kts"), script).unwrap();
        std::fs::write(temp.path().join("settings.gradle.kts"), "rootProject.name = \"other\"\n").unwrap();
        std::fs::write(temp.path().join("gradlew"), "").unwrap();

        let result = GradleAdapter::new()
            .validate_packagable(temp.path(), &request(None))
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("rootProject.name 'other'"));
    }

    #[test]
    fn test_assigned_literal_ignores_expressions() {
        assert_eq!(assigned_literal(PUBLISHING_SCRIPT, "version"), Some("1.0.0"));
        assert_eq!(assigned_literal("version = project.version as String?", "version"), None);
        assert_eq!(assigned_literal("group 'com.example'", "group"), None);
        assert!(declares_maven_publication(PUBLISHING_SCRIPT));
    }

    #[test]
    fn test_collect_uses_generated_pom() {
        let temp = TempDir::new().unwrap();
        let libs = temp.path().join("build").join("libs");
        std::fs::create_dir_all(&libs).unwrap();
        std::fs::write(libs.join("version-1.0.0.jar"), b"PK").unwrap();

        let publication = temp.path().join("build/publications/maven");
        std::fs::create_dir_all(&publication).unwrap();
        std::fs::write(
            publication.join("pom-default.xml"),
            r#"<project>
  <groupId>com.oskarsmc</groupId>
  <artifactId>version</artifactId>
  <version>1.0.0</version>
  <dependencies>
    <dependency>
      <groupId>org.jetbrains</groupId>
      <artifactId>annotations</artifactId>
      <version>23.1.0</version>
      <scope>runtime</scope>
    </dependency>
  </dependencies>
</project>"#,
        )
        .unwrap();

        let mut req = request(Some("true"));
        req.options = PackageOptions::new().sources(false).javadoc(false).skip_build(true);
        GradleAdapter::new().package(temp.path(), &req).unwrap();

        let pom = std::fs::read_to_string(libs.join("version-1.0.0.pom")).unwrap();
        assert!(pom.contains("<artifactId>annotations</artifactId>"));
    }

    #[test]
    fn test_validate_fails_without_build_file() {
        let temp = TempDir::new().unwrap();
        let result = GradleAdapter::new()
            .validate_packagable(temp.path(), &request(None))
            .unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_collect_from_existing_outputs() {
        let temp = TempDir::new().unwrap();
        let libs = temp.path().join("build").join("libs");
        std::fs::create_dir_all(&libs).unwrap();
        for name in [
            "version-1.0.0-SNAPSHOT.jar",
            "version-1.0.0-SNAPSHOT-sources.jar",
            "version-1.0.0-SNAPSHOT-javadoc.jar",
        ] {
            std::fs::write(libs.join(name), b"PK").unwrap();
        }

        let mut req = request(None);
        req.options = PackageOptions::new().skip_build(true);
        let bundle = GradleAdapter::new().package(temp.path(), &req).unwrap();

        assert_eq!(bundle.artifacts.len(), 4);
        assert!(bundle.ensure_complete().is_ok());
        assert!(libs.join("version-1.0.0-SNAPSHOT.pom").exists());
    }

    #[test]
    fn test_collect_reports_missing_jar() {
        let temp = TempDir::new().unwrap();
        let mut req = request(Some("true"));
        req.options = PackageOptions::new().skip_build(true);
        let err = GradleAdapter::new().package(temp.path(), &req).unwrap_err();
        assert!(err.to_string().contains("version-1.0.0.jar"));
    }
}
