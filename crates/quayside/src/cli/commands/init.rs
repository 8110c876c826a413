//! Init command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use quayside_core::config::defaults::{
    default_config_yaml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use quayside_core::config::write_config;

use crate::cli::Cli;

/// Syntax of the generated configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigSyntax {
    /// Commented TOML template
    #[default]
    Toml,
    /// YAML with every default spelled out
    Yaml,
}

/// Initialize a new Quayside configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration file syntax
    #[arg(long = "config-format", value_enum, default_value = "toml")]
    pub config_format: ConfigSyntax,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, format = ?self.config_format, "executing init command");
        let cwd = std::env::current_dir()?;

        let (default_name, content) = match self.config_format {
            ConfigSyntax::Toml => (DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_TEMPLATE.to_string()),
            ConfigSyntax::Yaml => (DEFAULT_CONFIG_YAML, default_config_yaml()),
        };
        let config_path = self.output.clone().unwrap_or_else(|| cwd.join(default_name));

        write_config(&config_path, &content, self.force)?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!("  1. Set project coordinates and repository URLs in {}", config_path.display());
            println!("  2. Run {} to verify your setup", style("quayside validate").cyan());
            println!(
                "  3. Run {} to see where a build would be published",
                style("quayside target").cyan()
            );
        }

        Ok(())
    }
}
