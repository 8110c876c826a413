//! Publish command

use clap::Args;
use console::style;
use tracing::{info, warn};

use quayside_adapters::{select_packager, PackageOptions, PackageRequest, PackagerRegistry};
use quayside_core::config::validation::{validate_for_publish, VALID_TOOLS};
use quayside_core::error::WorkflowError;
use quayside_core::{EnvironmentInputs, PublishPlanner, QuaysideError};
use quayside_stores::{MavenRepositoryTransport, UploadOptions, UploadResult, UploadTransport};

use crate::cli::commands::load_config;
use crate::cli::{output, Cli, OutputFormat};

/// Build, package and upload the artifact
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Resolve, build and compute destinations without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Reuse existing build outputs instead of running the build tool
    #[arg(long)]
    pub skip_build: bool,

    /// Build tool to use instead of the configured one
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(VALID_TOOLS))]
    pub tool: Option<String>,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.dry_run,
            skip_build = self.skip_build,
            tool = ?self.tool,
            "executing publish command"
        );
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let config = load_config(cli)?;
        validate_for_publish(&config)?;

        // Environment is read exactly once, here
        let inputs = EnvironmentInputs::capture(&config);
        let plan = PublishPlanner::new(&config).plan(&inputs)?;
        let text = cli.format == OutputFormat::Text && !cli.quiet;

        if text {
            output::info(&format!(
                "Publishing {} as {} to {}",
                style(plan.identity.coordinates()).bold(),
                output::channel_style(plan.channel()).apply_to(plan.channel()),
                output::path_style().apply_to(&plan.endpoint.url)
            ));
        }

        // Package
        let tool = self.tool.as_deref().unwrap_or(&config.package.tool);
        let registry = PackagerRegistry::new();
        let packager = select_packager(&cwd, tool, &registry)?;

        let options = PackageOptions::from_config(&config).skip_build(self.skip_build);
        let request = PackageRequest::new(plan.identity.clone(), options);

        let validation = packager.validate_packagable(&cwd, &request)?;
        for warning in &validation.warnings {
            warn!(packager = packager.name(), warning = %warning, "packaging warning");
            if text {
                output::warning(warning);
            }
        }
        if !validation.passed {
            return Err(QuaysideError::from(WorkflowError::ValidationFailed(
                validation.errors.join("; "),
            ))
            .into());
        }

        if text && !self.skip_build {
            output::info(&format!("Building with {}", packager.name()));
        }
        let bundle = packager.package(&cwd, &request)?;

        // Upload
        let upload_options = UploadOptions {
            dry_run: self.dry_run || config.publish.dry_run,
            ..UploadOptions::from_config(&config.publish)
        };
        let transport = MavenRepositoryTransport::with_timeout(upload_options.timeout)?;
        let result = transport
            .upload(&bundle, &plan.endpoint, &upload_options)
            .await?;

        self.report(&result, cli)
    }

    fn report(&self, result: &UploadResult, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                for warning in &result.warnings {
                    output::warning(warning);
                }
                if cli.verbose || result.dry_run {
                    for file in &result.files {
                        println!("  {} {}", style("↑").dim(), output::path_style().apply_to(&file.url));
                    }
                }

                let summary = format!(
                    "{} {} ({} files, {})",
                    if result.dry_run { "Would publish" } else { "Published" },
                    output::version_style().apply_to(&result.coordinates),
                    result.files.len(),
                    output::format_size(result.total_size())
                );
                if result.dry_run {
                    output::info(&summary);
                } else {
                    output::success(&summary);
                }
            }
        }
        Ok(())
    }
}
