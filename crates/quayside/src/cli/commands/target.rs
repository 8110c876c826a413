//! Target command

use clap::Args;
use tracing::info;

use quayside_core::{EnvironmentInputs, PublishPlanner, PublishTargetSelector, VersionString};

use crate::cli::commands::load_config;
use crate::cli::{output, Cli, OutputFormat};

/// Show the repository a version would be published to
#[derive(Debug, Args)]
pub struct TargetCommand {
    /// Version to select for instead of the resolved one
    #[arg(long = "artifact-version", value_name = "VERSION")]
    pub artifact_version: Option<String>,
}

impl TargetCommand {
    /// Execute the target command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(artifact_version = ?self.artifact_version, "executing target command");
        let config = load_config(cli)?;
        let inputs = EnvironmentInputs::capture(&config);

        let version = match &self.artifact_version {
            Some(v) => VersionString::parse(v.trim()),
            None => {
                PublishPlanner::new(&config)
                    .identity(inputs.release_signal.as_deref())
                    .version
            }
        };

        let selector = PublishTargetSelector::from_config(&config.repository)?;
        let endpoint = selector.select(
            &version,
            &inputs.release_credentials,
            &inputs.snapshot_credentials,
        );

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": version.as_str(),
                    "channel": endpoint.channel,
                    "repository": endpoint.name,
                    "url": endpoint.url.as_str(),
                    "auth": endpoint.auth_scheme.to_string(),
                    "username": endpoint.credentials.username,
                    "secret": output::redact(&endpoint.credentials.secret),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", endpoint.url);
                } else {
                    println!("{}", output::header("Publish Target"));
                    println!();
                    println!("{}", output::key_value("Version", &output::version_style().apply_to(&version).to_string()));
                    println!(
                        "{}",
                        output::key_value(
                            "Channel",
                            &output::channel_style(endpoint.channel).apply_to(endpoint.channel).to_string()
                        )
                    );
                    println!("{}", output::key_value("Repository", &endpoint.name));
                    println!("{}", output::key_value("URL", &output::path_style().apply_to(&endpoint.url).to_string()));
                    let username = if endpoint.credentials.username.is_empty() {
                        "(not set)"
                    } else {
                        endpoint.credentials.username.as_str()
                    };
                    println!("{}", output::key_value("Username", username));
                    println!("{}", output::key_value("Secret", output::redact(&endpoint.credentials.secret)));

                    if !endpoint.credentials.is_complete() {
                        println!();
                        output::warning("Credentials are incomplete; uploads will likely be rejected");
                    }
                }
            }
        }

        Ok(())
    }
}
