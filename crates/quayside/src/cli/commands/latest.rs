//! Latest command

use clap::Args;
use console::style;
use tracing::info;
use url::Url;

use quayside_stores::{HangarClient, LatestVersionQuery, HANGAR_PAPER, HANGAR_PAPER_DEV};

use crate::cli::{output, Cli, OutputFormat};

/// Look up the latest version of a Hangar project
#[derive(Debug, Args)]
pub struct LatestCommand {
    /// Project author
    pub author: String,

    /// Project slug
    pub slug: String,

    /// Only consider versions in this Hangar channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Only consider versions for this platform (e.g. paper, velocity)
    #[arg(long)]
    pub platform: Option<String>,

    /// Only consider versions supporting this platform version
    #[arg(long)]
    pub platform_version: Option<String>,

    /// Hangar instance to query
    #[arg(long, conflicts_with = "dev", default_value = HANGAR_PAPER)]
    pub hangar: Url,

    /// Query PaperMC's development instance
    #[arg(long)]
    pub dev: bool,
}

impl LatestCommand {
    /// Execute the latest command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(author = %self.author, slug = %self.slug, dev = self.dev, "executing latest command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    fn query(&self) -> LatestVersionQuery {
        LatestVersionQuery {
            author: self.author.clone(),
            slug: self.slug.clone(),
            channel: self.channel.clone(),
            platform: self.platform.clone(),
            platform_version: self.platform_version.clone(),
        }
    }

    fn instance(&self) -> anyhow::Result<Url> {
        if self.dev {
            Ok(Url::parse(HANGAR_PAPER_DEV)?)
        } else {
            Ok(self.hangar.clone())
        }
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = HangarClient::new(self.instance()?)?;
        let latest = client.latest_version(&self.query()).await?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&latest)?);
            }
            OutputFormat::Text => match latest {
                Some(version) if cli.quiet => println!("{}", version.name),
                Some(version) => {
                    println!("{}", output::header(&format!("{}/{}", self.author, self.slug)));
                    println!();
                    println!(
                        "{}",
                        output::key_value("Latest", &output::version_style().apply_to(&version.name).to_string())
                    );
                    println!(
                        "{}",
                        output::key_value("Published", &version.created_at.format("%Y-%m-%d %H:%M UTC").to_string())
                    );
                    if cli.verbose {
                        if let Some(description) = version.description.as_deref().filter(|d| !d.trim().is_empty()) {
                            println!();
                            println!("{}", style(description.trim()).dim());
                        }
                    }
                }
                None => {
                    if !cli.quiet {
                        output::warning(&format!(
                            "No versions of {}/{} match the given filters",
                            self.author, self.slug
                        ));
                    }
                }
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        latest: LatestCommand,
    }

    #[test]
    fn test_defaults_to_paper_instance() {
        let cmd = Harness::parse_from(["latest", "oskarzyg", "test"]).latest;
        assert_eq!(cmd.instance().unwrap().as_str(), HANGAR_PAPER);
        assert!(cmd.query().channel.is_none());
    }

    #[test]
    fn test_dev_instance_and_filters() {
        let cmd = Harness::parse_from([
            "latest",
            "oskarzyg",
            "test",
            "--dev",
            "--channel",
            "ForCiTesting",
            "--platform",
            "velocity",
        ])
        .latest;
        assert_eq!(cmd.instance().unwrap().as_str(), HANGAR_PAPER_DEV);
        let query = cmd.query();
        assert_eq!(query.channel.as_deref(), Some("ForCiTesting"));
        assert_eq!(query.platform.as_deref(), Some("velocity"));
    }
}
