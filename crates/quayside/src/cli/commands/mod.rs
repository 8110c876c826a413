//! CLI commands

mod completions;
mod init;
mod latest;
mod publish;
mod target;
mod validate;
mod version;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use latest::LatestCommand;
pub use publish::PublishCommand;
pub use target::TargetCommand;
pub use validate::ValidateCommand;
pub use version::VersionCommand;

use std::path::Path;

use quayside_core::config::{load_config_or_default, Config};

/// Load the configuration for the current directory, falling back to defaults
fn load_config(cli: &super::Cli) -> anyhow::Result<Config> {
    load_config_in(cli, &std::env::current_dir()?)
}

fn load_config_in(cli: &super::Cli, dir: &Path) -> anyhow::Result<Config> {
    let (config, path) = load_config_or_default(dir)?;
    if path.is_none() && !cli.quiet && cli.format == super::OutputFormat::Text {
        super::output::warning("No quayside.toml found, using defaults");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::Cli;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["quayside", "-q", "version"]).unwrap();
        let config = load_config_in(&cli, temp.path()).unwrap();
        assert_eq!(config.project.version, Config::default().project.version);
    }

    #[test]
    fn test_config_file_is_used() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("quayside.toml"),
            "[project]\ngroup = \"com.oskarsmc\"\nartifact = \"version\"\nversion = \"1.0.0\"\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from(["quayside", "version"]).unwrap();
        let config = load_config_in(&cli, temp.path()).unwrap();
        assert_eq!(config.project.artifact, "version");
    }
}
