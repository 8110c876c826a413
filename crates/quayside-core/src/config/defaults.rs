//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "quayside.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "quayside.yaml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".quayside.toml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".quayside.yaml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    serde_yaml::to_string(&Config::default()).unwrap_or_default()
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Quayside Configuration

[project]
group = "com.example"
artifact = "my-library"
# Base version. Snapshot builds get "-SNAPSHOT" appended automatically.
version = "0.1.0"

[release]
# Publishing is a release only when this variable equals "true" (any case).
signal_env = "GRADLE_RELEASE"

[repository]
name = "maven"

[repository.release]
url = "https://repo.example.com/releases"
username_env = "MAVEN_USERNAME"
secret_env = "MAVEN_SECRET"

[repository.snapshot]
url = "https://repo.example.com/snapshots"
username_env = "MAVEN_USERNAME"
secret_env = "MAVEN_SECRET"

[package]
tool = "auto"
packaging = "jar"
sources = true
javadoc = true

[publish]
dry_run = false
checksums = true
update_metadata = true
timeout_secs = 300
"#;
