//! Version command

use clap::Args;
use console::style;
use tracing::info;

use quayside_core::{EnvironmentInputs, PublishPlanner};

use crate::cli::commands::load_config;
use crate::cli::{output, Cli, OutputFormat};

/// Show the version the current environment resolves to
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Use this release signal instead of reading the environment
    #[arg(long)]
    pub release_signal: Option<String>,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release_signal = ?self.release_signal, "executing version command");
        let config = load_config(cli)?;

        let signal = match &self.release_signal {
            Some(signal) => Some(signal.clone()),
            None => EnvironmentInputs::capture(&config).release_signal,
        };
        let identity = PublishPlanner::new(&config).identity(signal.as_deref());
        let channel = identity.channel();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "base": config.project.version.trim(),
                    "version": identity.version.as_str(),
                    "channel": channel,
                    "coordinates": identity.coordinates(),
                    "release_signal": signal,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", identity.version);
                } else {
                    println!("{}", output::header("Resolved Version"));
                    println!();
                    println!("  Version:      {}", output::version_style().apply_to(&identity.version));
                    println!("  Channel:      {}", output::channel_style(channel).apply_to(channel));
                    println!("  Coordinates:  {}", identity.coordinates());
                    if cli.verbose {
                        println!(
                            "  Signal:       {} = {}",
                            config.release.signal_env,
                            style(signal.as_deref().unwrap_or("(unset)")).dim()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
